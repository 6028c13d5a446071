//! Prompt construction and record enrichment.
//!
//! Walks every entity and method in the extracted records, asks the
//! summarizer for a one-line description, and collects the answers
//! into [`Summaries`]. Records themselves are never modified.

use crate::client::{Summarize, SummaryOutcome};
use astmap_extractor::{Decorator, Entity, FileRecord, Method};
use astmap_graph::Summaries;
use std::collections::BTreeMap;

/// Fixed attribute value when the collaborator fails or refuses.
pub const SUMMARY_UNAVAILABLE: &str = "[summary unavailable]";

/// Summarize every entity and method across the record set. A failed
/// or blocked answer becomes the sentinel, never an error: enrichment
/// must not be able to sink the pipeline.
pub async fn enrich(
    records: &BTreeMap<String, FileRecord>,
    summarizer: &dyn Summarize,
) -> Summaries {
    let mut summaries = Summaries::default();

    for record in records.values() {
        for (entity_id, entity) in &record.entities {
            let prompt = entity_prompt(record, entity);
            summaries
                .entity_descriptions
                .insert(entity_id.clone(), resolve(summarizer, &prompt).await);
        }
        for (method_id, method) in &record.methods {
            let prompt = method_prompt(record, method);
            summaries
                .method_summaries
                .insert(method_id.clone(), resolve(summarizer, &prompt).await);
        }
    }

    log::info!(
        "summarized {} entities and {} methods",
        summaries.entity_descriptions.len(),
        summaries.method_summaries.len()
    );
    summaries
}

async fn resolve(summarizer: &dyn Summarize, prompt: &str) -> String {
    match summarizer.summarize(prompt).await {
        SummaryOutcome::Summary(text) => text,
        SummaryOutcome::Blocked | SummaryOutcome::Unavailable => {
            SUMMARY_UNAVAILABLE.to_string()
        }
    }
}

fn entity_prompt(record: &FileRecord, entity: &Entity) -> String {
    let decorators = decorators_str(record.decorators.get(&entity.entity_id));

    let dependencies = record
        .dependencies
        .get(&entity.entity_id)
        .map(|deps| {
            deps.iter()
                .map(|d| format!("{}: {}", d.name, d.type_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "None".to_string());

    let methods: Vec<String> = record
        .methods
        .values()
        .filter(|m| m.entity_id == entity.entity_id)
        .map(|m| format!("{}()", m.name))
        .collect();
    let methods = if methods.is_empty() {
        "None".to_string()
    } else {
        methods.join(", ")
    };

    format!(
        "Summarize the role of {} '{}' with decorators: {decorators}, \
         dependencies: {dependencies}, and methods: {methods}",
        entity.kind.as_str(),
        entity.name
    )
}

fn method_prompt(record: &FileRecord, method: &Method) -> String {
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_str))
        .collect::<Vec<_>>()
        .join(", ");
    let signature = format!(
        "{}{}({params}): {}",
        if method.is_async { "async " } else { "" },
        method.name,
        method.return_type_str
    );
    let decorators = decorators_str(record.decorators.get(&method.method_id));

    format!(
        "Summarize the purpose of method with signature '{signature}' and decorators: {decorators}"
    )
}

fn decorators_str(decorators: Option<&Vec<Decorator>>) -> String {
    let rendered = decorators
        .map(|ds| {
            ds.iter()
                .map(|d| format!("@{}{}", d.name, d.arguments_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    if rendered.is_empty() {
        "None".to_string()
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astmap_extractor::{EntityKind, MethodKind, Parameter};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct Scripted {
        prompts: Mutex<Vec<String>>,
        outcome: fn(&str) -> SummaryOutcome,
    }

    #[async_trait]
    impl Summarize for Scripted {
        async fn summarize(&self, prompt: &str) -> SummaryOutcome {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.outcome)(prompt)
        }
    }

    fn sample_record() -> FileRecord {
        let mut record = FileRecord::empty("src/auth.ts");
        record.entities.insert(
            "src/auth.ts::AuthService".to_string(),
            Entity {
                entity_id: "src/auth.ts::AuthService".to_string(),
                name: "AuthService".to_string(),
                kind: EntityKind::Class,
                file_id: "src/auth.ts".to_string(),
                super_class: None,
                implements: Vec::new(),
                kind_detail: None,
                var_kind: None,
            },
        );
        record.decorators.insert(
            "src/auth.ts::AuthService".to_string(),
            vec![Decorator {
                name: "Injectable".to_string(),
                arguments_str: "()".to_string(),
            }],
        );
        record.dependencies.insert(
            "src/auth.ts::AuthService".to_string(),
            vec![astmap_extractor::Dependency {
                name: "users".to_string(),
                type_str: "UserRepo".to_string(),
                accessibility: Some("private".to_string()),
                readonly: true,
            }],
        );
        record.methods.insert(
            "src/auth.ts::AuthService::login".to_string(),
            Method {
                method_id: "src/auth.ts::AuthService::login".to_string(),
                name: "login".to_string(),
                kind: MethodKind::Method,
                entity_id: "src/auth.ts::AuthService".to_string(),
                is_async: true,
                parameters: vec![Parameter {
                    name: "token".to_string(),
                    type_str: "string".to_string(),
                    has_default: false,
                }],
                return_type_str: "Promise<Session>".to_string(),
            },
        );
        record
    }

    fn records() -> BTreeMap<String, FileRecord> {
        let record = sample_record();
        let mut map = BTreeMap::new();
        map.insert(record.file_id.clone(), record);
        map
    }

    #[tokio::test]
    async fn prompts_carry_entity_and_method_context() {
        let scripted = Scripted {
            prompts: Mutex::new(Vec::new()),
            outcome: |_| SummaryOutcome::Summary("fine".to_string()),
        };

        let summaries = enrich(&records(), &scripted).await;
        assert_eq!(
            summaries.entity_descriptions["src/auth.ts::AuthService"],
            "fine"
        );

        let prompts = scripted.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(
            prompts[0],
            "Summarize the role of Class 'AuthService' with decorators: @Injectable(), \
             dependencies: users: UserRepo, and methods: login()"
        );
        assert_eq!(
            prompts[1],
            "Summarize the purpose of method with signature \
             'async login(token: string): Promise<Session>' and decorators: None"
        );
    }

    #[tokio::test]
    async fn blocked_and_unavailable_become_the_sentinel() {
        let scripted = Scripted {
            prompts: Mutex::new(Vec::new()),
            outcome: |prompt| {
                if prompt.contains("method") {
                    SummaryOutcome::Unavailable
                } else {
                    SummaryOutcome::Blocked
                }
            },
        };

        let summaries = enrich(&records(), &scripted).await;
        assert_eq!(
            summaries.entity_descriptions["src/auth.ts::AuthService"],
            SUMMARY_UNAVAILABLE
        );
        assert_eq!(
            summaries.method_summaries["src/auth.ts::AuthService::login"],
            SUMMARY_UNAVAILABLE
        );
    }
}
