use std::future::Future;

/// A filtered, ordered, capped query against one Socrata dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetQuery {
    pub where_clause: Option<String>,
    pub order_by: Vec<String>,
    /// Maximum number of records the caller keeps.
    pub limit: usize,
}

impl DatasetQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            where_clause: None,
            order_by: Vec::new(),
            limit,
        }
    }

    pub fn filter(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order_by.push(format!("{column} ASC"));
        self
    }

    /// Rows requested upstream. One past the cap so truncation is detectable.
    pub fn probe_limit(&self) -> usize {
        self.limit.saturating_add(1)
    }

    /// SoQL query-string parameters for this query.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(clause) = &self.where_clause {
            params.push(("$where", clause.clone()));
        }
        if !self.order_by.is_empty() {
            params.push(("$order", self.order_by.join(", ")));
        }
        params.push(("$limit", self.probe_limit().to_string()));
        params
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("unable to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// Retrieval seam for the remote registries. Implementations return the raw
/// JSON array body; decoding belongs to the record sources.
pub trait DatasetGateway: Send + Sync {
    fn fetch(
        &self,
        endpoint: &str,
        query: &DatasetQuery,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_render_soql_clauses_with_probe_limit() {
        let query = DatasetQuery::new(5000)
            .filter("unitstatus='Active'")
            .order_asc("seattlebusinesslicensenumber");

        assert_eq!(
            query.to_params(),
            vec![
                ("$where", "unitstatus='Active'".to_string()),
                ("$order", "seattlebusinesslicensenumber ASC".to_string()),
                ("$limit", "5001".to_string()),
            ]
        );
    }

    #[test]
    fn bare_query_only_sends_limit() {
        let query = DatasetQuery::new(10);
        assert_eq!(query.to_params(), vec![("$limit", "11".to_string())]);
    }
}
