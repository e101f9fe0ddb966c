//! Command line parsing.

use std::path::PathBuf;

use crate::error::ClientError;

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Send {
        config_path: Option<PathBuf>,
        tokens: Vec<String>,
    },
}

/// Parse arguments, excluding the program name.
///
/// Options are only recognized before the first token; `--` ends them.
pub fn parse_args<I>(args: I) -> Result<Invocation, ClientError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut tokens = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-V" | "--version" => return Ok(Invocation::Version),
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    return Err(ClientError::Usage {
                        message: format!("{} requires a path", arg),
                    })
                }
            },
            "--" => {
                tokens.extend(args.by_ref());
                break;
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    config_path = Some(PathBuf::from(path));
                } else {
                    tokens.push(arg);
                    tokens.extend(args.by_ref());
                    break;
                }
            }
        }
    }

    if tokens.is_empty() {
        return Err(ClientError::Usage {
            message: "no tokens given".to_string(),
        });
    }

    Ok(Invocation::Send {
        config_path,
        tokens,
    })
}
