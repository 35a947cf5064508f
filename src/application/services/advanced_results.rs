//! The list pipeline shared by every collection endpoint.
//!
//! A translated [`QueryDescriptor`] is executed together with a count over the
//! same filter, each item is projected to the selected fields, and the
//! requested relations are embedded. The result is a [`Page`] of JSON
//! documents ready for the envelope.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use crate::domain::pagination::Page;
use crate::domain::query::{Populate, QueryDescriptor, Relation, Resource, Selection};
use crate::domain::repositories::{BootcampRepository, CourseRepository, UserRepository};
use crate::error::AppError;

/// Runs list queries and embeds related entities.
pub struct AdvancedResults {
    bootcamps: Arc<dyn BootcampRepository>,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdvancedResults {
    pub fn new(
        bootcamps: Arc<dyn BootcampRepository>,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            bootcamps,
            courses,
            users,
        }
    }

    /// Awaits the page fetch and the total count concurrently, then projects
    /// and populates the items.
    ///
    /// # Errors
    ///
    /// Propagates the first storage failure of either query.
    pub async fn collect<R, F, C>(
        &self,
        query: &QueryDescriptor<R>,
        fetch: F,
        count: C,
    ) -> Result<Page<Value>, AppError>
    where
        R: Resource,
        F: Future<Output = Result<Vec<R>, AppError>>,
        C: Future<Output = Result<u64, AppError>>,
    {
        let (items, total) = tokio::try_join!(fetch, count)?;

        let mut documents = items
            .iter()
            .map(|item| project(item, &query.selection))
            .collect::<Result<Vec<_>, _>>()?;

        self.populate(&mut documents, &query.populate).await?;

        Ok(Page::new(documents, total, query.page))
    }

    /// Serializes a single entity and embeds `populate` into it.
    pub async fn document<R: Resource>(
        &self,
        item: &R,
        populate: &[Populate],
    ) -> Result<Value, AppError> {
        let mut documents = [to_document(item)?];
        self.populate(&mut documents, populate).await?;
        let [document] = documents;
        Ok(document)
    }

    /// Embeds each relation into every document, loading related rows in one
    /// batch per relation.
    pub async fn populate(&self, documents: &mut [Value], populate: &[Populate]) -> Result<(), AppError> {
        for entry in populate {
            match entry.relation {
                Relation::Bootcamp => {
                    let ids = referenced_ids(documents, entry.relation.path());
                    let related = self.bootcamps.find_by_ids(&ids).await?;
                    let by_id = index_by_id(&related, entry.select)?;
                    embed_belongs_to(documents, entry.relation.path(), &by_id);
                }
                Relation::User => {
                    let ids = referenced_ids(documents, entry.relation.path());
                    let related = self.users.find_by_ids(&ids).await?;
                    let by_id = index_by_id(&related, entry.select)?;
                    embed_belongs_to(documents, entry.relation.path(), &by_id);
                }
                Relation::Courses => {
                    let ids = referenced_ids(documents, "id");
                    let courses = self.courses.find_by_bootcamps(&ids).await?;

                    let mut grouped: HashMap<i64, Vec<Value>> = HashMap::new();
                    for course in &courses {
                        grouped
                            .entry(course.bootcamp_id)
                            .or_default()
                            .push(select_fields(to_document(course)?, entry.select));
                    }

                    for document in documents.iter_mut() {
                        let Some(id) = document.get("id").and_then(Value::as_i64) else {
                            continue;
                        };
                        if let Value::Object(map) = document {
                            let list = grouped.remove(&id).unwrap_or_default();
                            map.insert(entry.relation.path().to_string(), Value::Array(list));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

pub fn to_document<T: Serialize>(item: &T) -> Result<Value, AppError> {
    serde_json::to_value(item).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize entity");
        AppError::server("Server Error")
    })
}

/// Serializes `item` keeping only the selected fields.
pub fn project<R: Resource>(item: &R, selection: &Selection) -> Result<Value, AppError> {
    let mut document = to_document(item)?;

    if let (Selection::Fields(_), Value::Object(map)) = (selection, &mut document) {
        map.retain(|key, _| selection.includes(key));
    }

    Ok(document)
}

/// Keeps `id` plus `fields`; an empty list keeps everything.
fn select_fields(document: Value, fields: &[&str]) -> Value {
    if fields.is_empty() {
        return document;
    }

    match document {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key == "id" || fields.contains(&key.as_str()))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

/// Distinct integer values of `key` across documents.
fn referenced_ids(documents: &[Value], key: &str) -> Vec<i64> {
    let mut seen = HashSet::new();
    documents
        .iter()
        .filter_map(|d| d.get(key).and_then(Value::as_i64))
        .filter(|id| seen.insert(*id))
        .collect()
}

fn index_by_id<R: Resource>(items: &[R], select: &[&str]) -> Result<HashMap<i64, Value>, AppError> {
    items
        .iter()
        .map(|item| Ok((item.id(), select_fields(to_document(item)?, select))))
        .collect()
}

/// Replaces the id stored under `key` with the related document, or null
/// when the target no longer exists. Documents without the key are skipped.
fn embed_belongs_to(documents: &mut [Value], key: &str, related: &HashMap<i64, Value>) {
    for document in documents.iter_mut() {
        let Some(slot) = document.get_mut(key) else {
            continue;
        };
        if let Some(id) = slot.as_i64() {
            *slot = related.get(&id).cloned().unwrap_or(Value::Null);
        }
    }
}
