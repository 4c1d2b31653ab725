use crate::error::Result;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        RawResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes http requests for a generated client
///
/// Implementations only move bytes. Status codes are interpreted by
/// [`verify_response`](crate::verify_response), so a transport should return
/// non-success responses as `Ok` and reserve `Err` for requests that never
/// completed.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn execute(&self, method: &str, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, method: &str, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse> {
        (**self).execute(method, url, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, method: &str, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse> {
        (**self).execute(method, url, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(RawResponse::new(200, "[]").is_success());
        assert!(RawResponse::new(204, Vec::new()).is_success());
        assert!(!RawResponse::new(301, Vec::new()).is_success());
        assert!(!RawResponse::new(404, Vec::new()).is_success());
    }

    #[test]
    fn test_boxed_transport_delegates() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|method, url, body| method == "GET" && url == "https://x/y" && body.is_none())
            .times(1)
            .returning(|_, _, _| Ok(RawResponse::new(200, "1")));

        let boxed: Box<dyn Transport> = Box::new(mock);
        let response = boxed.execute("GET", "https://x/y", None).unwrap();
        assert_eq!(response.body, b"1");
    }
}
