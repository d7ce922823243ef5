use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Cannot sample {requested} distinct {what} from a population of {available}")]
    SampleExceedsPopulation {
        what: &'static str,
        requested: u64,
        available: u64,
    },

    #[error("Order {order_id} has no order items")]
    OrderWithoutItems { order_id: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
