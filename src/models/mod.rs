pub mod distilbert;

pub use distilbert::DistilBertSentimentModel;
