/// Use cases module containing application business logic orchestration
mod analyze_qkview;

pub use analyze_qkview::AnalyzeQkviewUseCase;
