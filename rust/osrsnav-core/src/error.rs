use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("token is not a regex pattern: {0}")]
    MalformedValue(&'static str),
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum EdgeDecodeError {
    #[error("edge is not a JSON object")]
    NotAnObject,
    #[error("edge has no string `type` discriminator")]
    MissingDiscriminator,
    #[error("unknown edge type `{0}`")]
    UnknownKind(String),
    #[error("malformed {kind} edge: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("route is not a JSON array")]
    NotAnArray,
}

#[derive(Error, Debug)]
#[error("unknown skill `{0}`")]
pub struct UnknownSkill(pub String);

#[derive(Error, Debug)]
#[error("expected `x,y,plane`, got `{0}`")]
pub struct InvalidCoordinate(pub String);
