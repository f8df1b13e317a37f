use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const BIGIP_CONF: &str = "\
ltm pool /Common/pool_app {
    members {
        /Common/10.0.0.1:443 {
            address 10.0.0.1
            state user-down
        }
    }
    monitor /Common/https
}
ltm pool /Common/pool_web {
    members {
        /Common/10.0.0.2:80 {
            address 10.0.0.2
        }
    }
}
ltm virtual /Common/vs_app {
    destination /Common/192.168.1.10:443
    pool /Common/pool_app
}
ltm virtual /Common/vs_web {
    destination /Common/192.168.1.20:80
    pool /Common/pool_web
}
";

pub const LTM_LOG: &str = "\
Mar 5 10:00:00 2024 bigip1 err tmm[1234]: 01010028:3: error: No members available for pool /Common/pool_app
Mar 5 10:05:00 2024 bigip1 crit tmm[1234]: critical: Certificate /Common/app.crt expired for vs_app
Mar 6 09:00:00 2024 bigip1 warning tmm[1234]: TLS 1.0 handshake accepted from 10.1.1.1:5555
Mar 6 09:30:00 2024 bigip1 notice mcpd[99]: configuration saved
Mar 6 09:31:00 2024 bigip1 info mcpd[99]: heartbeat
";

/// Writes a gzip-compressed tar at `dir/name` holding `files` (path, content)
pub fn build_archive(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (entry_path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, entry_path, *content)
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
    path
}

/// A small but complete qkview: bigip.conf, one ltm log and files the scanner must skip
pub fn build_qkview(dir: &Path, name: &str) -> PathBuf {
    build_archive(
        dir,
        name,
        &[
            ("config/bigip.conf", BIGIP_CONF.as_bytes()),
            ("var/log/ltm", LTM_LOG.as_bytes()),
            (
                "var/log/audit",
                b"Mar 5 10:00:00 2024 bigip1 error: audit lines are skipped\n",
            ),
            ("var/log/journal/system.journal", b"\x00\x01binary\x00"),
            ("var/log/wtmp", b"\x00\x00\x01\x02\x03"),
        ],
    )
}

/// An archive without var/log
pub fn build_archive_without_logs(dir: &Path, name: &str) -> PathBuf {
    build_archive(dir, name, &[("config/bigip.conf", BIGIP_CONF.as_bytes())])
}
