use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::config::DumpConfig;
use crate::error::DumpError;

use super::adhoc::{claims_task, item_task, sample_tasks, vocabularies_task};
use super::assembly::assemble_products;
use super::types::WorkQueue;

/// One positional dump spec from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpRequest {
    Products,
    Claims,
    Vocabularies,
    Samples,
    /// Authenticate and print the access token, nothing else.
    Token,
    Item(u64),
}

pub const DEFAULT_REQUESTS: [DumpRequest; 3] = [
    DumpRequest::Products,
    DumpRequest::Vocabularies,
    DumpRequest::Samples,
];

impl FromStr for DumpRequest {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(Self::Products),
            "claims" => Ok(Self::Claims),
            "vocs" => Ok(Self::Vocabularies),
            "samples" => Ok(Self::Samples),
            "token" => Ok(Self::Token),
            other => other
                .parse::<u64>()
                .map(Self::Item)
                .map_err(|_| DumpError::InvalidRequest(s.to_string())),
        }
    }
}

impl fmt::Display for DumpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => f.write_str("products"),
            Self::Claims => f.write_str("claims"),
            Self::Vocabularies => f.write_str("vocs"),
            Self::Samples => f.write_str("samples"),
            Self::Token => f.write_str("token"),
            Self::Item(id) => write!(f, "{id}"),
        }
    }
}

/// Parses dump specs, falling back to [`DEFAULT_REQUESTS`] when none are
/// given. Repeated specs are dropped, first occurrence wins.
pub fn parse_requests<S: AsRef<str>>(specs: &[S]) -> Result<Vec<DumpRequest>, DumpError> {
    if specs.is_empty() {
        return Ok(DEFAULT_REQUESTS.to_vec());
    }
    let mut out: Vec<DumpRequest> = Vec::with_capacity(specs.len());
    for spec in specs {
        let req = spec.as_ref().parse::<DumpRequest>()?;
        if !out.contains(&req) {
            out.push(req);
        }
    }
    Ok(out)
}

/// Builds the work queue for the requested dumps, in request order.
/// `Token` contributes nothing.
pub fn assemble_requests(
    requests: &[DumpRequest],
    cfg: &DumpConfig,
    now: DateTime<Utc>,
) -> Result<WorkQueue, DumpError> {
    let mut queue = WorkQueue::new();
    for req in requests {
        match req {
            DumpRequest::Products => queue.append(assemble_products(cfg, now)?)?,
            DumpRequest::Vocabularies => queue.push(vocabularies_task())?,
            DumpRequest::Claims => queue.push(claims_task())?,
            DumpRequest::Samples => {
                if cfg.samples.is_empty() {
                    tracing::warn!(
                        target: "dhubdump.assembly",
                        "samples requested but no sample ids are configured"
                    );
                }
                for task in sample_tasks(&cfg.samples) {
                    queue.push(task)?;
                }
            }
            DumpRequest::Item(id) => queue.push(item_task(*id))?,
            DumpRequest::Token => {}
        }
    }
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_defaults_when_empty() {
        let none: [&str; 0] = [];
        assert_eq!(parse_requests(&none).unwrap(), DEFAULT_REQUESTS.to_vec());
    }

    #[test]
    fn test_parse_mixed_specs() {
        let reqs = parse_requests(&["claims", "12345", "VOCS", "claims"]).unwrap();
        assert_eq!(
            reqs,
            vec![
                DumpRequest::Claims,
                DumpRequest::Item(12345),
                DumpRequest::Vocabularies
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = parse_requests(&["products", "everything"]).unwrap_err();
        assert!(matches!(err, DumpError::InvalidRequest(ref s) if s == "everything"));
        assert!(err.is_preflight());
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for token in ["products", "claims", "vocs", "samples", "token", "42"] {
            assert_eq!(token.parse::<DumpRequest>().unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_assemble_adhoc_requests() {
        let cfg = DumpConfig {
            samples: vec!["7".into(), "8".into()],
            ..DumpConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        let queue = assemble_requests(
            &[
                DumpRequest::Token,
                DumpRequest::Vocabularies,
                DumpRequest::Samples,
                DumpRequest::Item(99),
                DumpRequest::Claims,
            ],
            &cfg,
            now,
        )
        .unwrap();
        let names: Vec<&str> = queue.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "vocabularies",
                "sample-7",
                "sample-8",
                "product-99",
                "claims",
            ]
        );
    }
}
