use std::ffi::OsString;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Missing required branch parameter")]
    MissingBranch,

    #[error("Invalid {0} parameter: not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Positional arguments: `<branch> [pet_type]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictArgs {
    pub branch: String,
    pub pet_type: Option<String>,
}

impl PredictArgs {
    // Arguments past the pet type are ignored
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);

        let branch = args.next().ok_or(ArgsError::MissingBranch)?;
        let branch = decode(branch, "branch")?;
        let pet_type = args.next().map(|value| decode(value, "pet type")).transpose()?;

        Ok(Self { branch, pet_type })
    }
}

fn decode(value: OsString, role: &'static str) -> Result<String, ArgsError> {
    value.into_string().map_err(|_| ArgsError::NotUnicode(role))
}
