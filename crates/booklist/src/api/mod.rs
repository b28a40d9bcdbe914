use std::time::Duration;

use log::{error, info, trace, warn};
use reqwest::{StatusCode, Url};

pub(crate) mod google_books;

/// How long to wait for the connection to the API to be established.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// How long to wait for the API to respond once connected.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Deadline for a whole request: the connect phase plus the read phase.
///
/// The blocking client only has a per-request deadline besides the connect timeout, so the read
/// phase is bounded by what is left of this deadline once connected.
pub(crate) const REQUEST_TIMEOUT: Duration =
    Duration::from_secs(CONNECT_TIMEOUT.as_secs() + READ_TIMEOUT.as_secs());

pub trait Client {
    fn get_text(&self, url: &str) -> Result<String, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::new(
                ErrorKind::Status,
                format!("Error response code: {status}"),
            ));
        }

        resp.text().map_err(|e| {
            if e.is_decode() {
                Error::wrap(ErrorKind::Deserialize, e)
            } else {
                Error::wrap(ErrorKind::IO, e)
            }
        })
    }
}

/// Builds the blocking HTTP client used for every request, with the fixed
/// [`CONNECT_TIMEOUT`] and a [`REQUEST_TIMEOUT`] that leaves [`READ_TIMEOUT`] after connecting.
pub(crate) fn http_client() -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::wrap(ErrorKind::IO, e))
}

/// Fetches the text at `url` with the given client.
///
/// The url is validated first so a malformed url never reaches the client.
pub(crate) fn fetch_with<C: Client>(client: &C, url: &str) -> Result<String, Error> {
    let url = Url::parse(url).map_err(|e| {
        error!("Problem building the URL '{url}': {e}");
        Error::wrap(ErrorKind::Url, e)
    })?;

    info!("Requesting '{url}'");
    let text = client.get_text(url.as_str()).map_err(|e| {
        warn!("Problem retrieving the response: {e}");
        e
    })?;

    trace!("Request was successful");
    Ok(text)
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that implementing functions are building the
    /// correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_text(&self, url: &str) -> Result<String, Error> {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            P::produce()
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::IO, "Network error")),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}
