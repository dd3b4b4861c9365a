use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown zodiac sign: {input:?}")]
pub struct UnknownSign {
    pub input: String,
}

impl UnknownSign {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
