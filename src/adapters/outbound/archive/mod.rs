/// Archive adapters for unpacking qkview bundles
mod tar_gz_extractor;

pub use tar_gz_extractor::TarGzExtractor;
