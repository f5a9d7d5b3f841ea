use crate::error::Result;

pub mod decode;
pub mod request;
pub mod stream;
pub mod transport;

pub use request::{build_batch_params, expand_env_vars, render_template, ParamValue, QueryParams};
pub use stream::EventStream;
pub use transport::{HttpTransport, Transport};

pub type FetchResult<T> = Result<T>;
