use crate::error::Failure;

pub(crate) type ParseResult<T> = std::result::Result<T, Failure>;
