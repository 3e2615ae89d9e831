// Fusion Module - merge, rank, summarise
//
// Extractors → ScoreAggregator → DecisionRanker → ClassificationResult,
// with genre_statistics summarising a batch of results.

pub mod aggregator;
pub mod ranker;
pub mod statistics;

pub use aggregator::ScoreAggregator;
pub use ranker::DecisionRanker;
pub use statistics::{genre_statistics, GenreStatistics};
