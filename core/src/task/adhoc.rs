use crate::query::{FilterOp, Query, ResourceType};

use super::types::DumpTask;

const SAMPLES_DIR: &str = "samples";
const BY_ID_DIR: &str = "byid";

/// Fields a claim must carry to be part of the claims dump.
const CLAIM_REQUIRED_FIELDS: &[&str] = &["partner", "owner"];

/// Full vocabulary / taxonomy dump.
pub fn vocabularies_task() -> DumpTask {
    DumpTask::new(".", "vocabularies", Query::new(ResourceType::Vocabulary))
}

pub fn claims_task() -> DumpTask {
    let query = CLAIM_REQUIRED_FIELDS
        .iter()
        .fold(Query::new(ResourceType::Claim), |q, field| {
            q.apply(FilterOp::Require(field.to_string()))
        });
    DumpTask::new(".", "claims", query)
}

pub fn sample_tasks(ids: &[String]) -> Vec<DumpTask> {
    ids.iter()
        .map(|id| DumpTask::new(SAMPLES_DIR, format!("sample-{id}"), product_by_id(id)))
        .collect()
}

pub fn item_task(id: u64) -> DumpTask {
    DumpTask::new(
        BY_ID_DIR,
        format!("product-{id}"),
        product_by_id(&id.to_string()),
    )
}

fn product_by_id(id: &str) -> Query {
    Query::new(ResourceType::Product).apply(FilterOp::ForId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_task_requires_partner_and_owner() {
        let task = claims_task();
        assert_eq!(task.query.resource(), ResourceType::Claim);
        assert_eq!(
            task.query.required(),
            ["partner".to_string(), "owner".to_string()]
        );
    }

    #[test]
    fn test_item_and_sample_tasks() {
        let item = item_task(4711);
        assert_eq!(item.directory, "byid");
        assert_eq!(item.name, "product-4711");
        assert_eq!(item.query.id(), Some("4711"));

        let samples = sample_tasks(&["1".to_string(), "2".to_string()]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].name, "sample-2");
        assert_eq!(samples[1].directory, "samples");
    }
}
