use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LootError {
    #[error("not enough cargo space: need {required} t, have {available} t")]
    InsufficientSpace { required: u32, available: u32 },
}
