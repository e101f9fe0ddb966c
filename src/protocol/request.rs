//! Request line construction.

use crate::error::ClientError;

/// How tokens are laid out on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestFormat {
    /// Every token is followed by a space, the last one included.
    #[default]
    TrailingSeparator,
    /// Tokens are joined with single spaces.
    Joined,
}

/// A newline-terminated request line.
///
/// Tokens are not escaped: a space inside a token is indistinguishable from a
/// token boundary on the far side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    line: String,
}

impl Request {
    /// Build a request from the caller's tokens.
    ///
    /// Fails with a usage error if there are no tokens.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], format: RequestFormat) -> Result<Self, ClientError> {
        if tokens.is_empty() {
            return Err(ClientError::Usage {
                message: "at least one token is required".to_string(),
            });
        }

        let mut line = String::new();
        for (i, token) in tokens.iter().enumerate() {
            match format {
                RequestFormat::TrailingSeparator => {
                    line.push_str(token.as_ref());
                    line.push(' ');
                }
                RequestFormat::Joined => {
                    if i > 0 {
                        line.push(' ');
                    }
                    line.push_str(token.as_ref());
                }
            }
        }
        line.push('\n');

        Ok(Self { line })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Always false: a request holds at least the newline.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token_keeps_trailing_space() {
        let request = Request::from_tokens(&["STATUS"], RequestFormat::TrailingSeparator).unwrap();
        assert_eq!(request.as_str(), "STATUS \n");
    }

    #[test]
    fn test_multiple_tokens() {
        let tokens = ["get", "/VirtualBox/GuestInfo/metadata"];

        let request = Request::from_tokens(&tokens, RequestFormat::TrailingSeparator).unwrap();
        assert_eq!(request.as_str(), "get /VirtualBox/GuestInfo/metadata \n");

        let request = Request::from_tokens(&tokens, RequestFormat::Joined).unwrap();
        assert_eq!(request.as_str(), tokens.join(" ") + "\n");
    }

    #[test]
    fn test_tokens_are_not_escaped() {
        let request = Request::from_tokens(&["a b", "c"], RequestFormat::Joined).unwrap();
        assert_eq!(request.as_bytes(), b"a b c\n");
        assert_eq!(request.len(), 6);
    }

    #[test]
    fn test_empty_tokens_is_usage_error() {
        let tokens: [&str; 0] = [];
        let result = Request::from_tokens(&tokens, RequestFormat::default());
        assert!(matches!(result, Err(ClientError::Usage { .. })));
    }
}
