//! Backend-neutral description of a list request.

use std::marker::PhantomData;

use super::fields::{Field, Resource};
use super::filter::{Condition, Filter, FilterValue, Operator};
use crate::domain::pagination::{PageRequest, PagingDefaults};
use crate::error::AppError;

/// Query-string keys that never become filter conditions.
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub field: &'static Field,
    pub direction: Direction,
}

/// Which fields of each item the caller asked to receive.
#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    All,
    /// Always contains `id`.
    Fields(Vec<&'static Field>),
}

impl Selection {
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Fields(fields) => fields.iter().any(|f| f.name == name),
        }
    }
}

/// A related entity that can be embedded into list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Replace the `bootcamp` id with a projection of the bootcamp.
    Bootcamp,
    /// Replace the `user` id with a projection of the user.
    User,
    /// Attach a `courses` array of the bootcamp's courses.
    Courses,
}

impl Relation {
    /// JSON key the relation is written to.
    pub fn path(&self) -> &'static str {
        match self {
            Relation::Bootcamp => "bootcamp",
            Relation::User => "user",
            Relation::Courses => "courses",
        }
    }
}

/// Route-level instruction to embed a relation, optionally narrowed to a
/// fixed set of its fields (empty means every field).
#[derive(Debug, Clone, Copy)]
pub struct Populate {
    pub relation: Relation,
    pub select: &'static [&'static str],
}

impl Populate {
    pub const fn new(relation: Relation, select: &'static [&'static str]) -> Self {
        Self { relation, select }
    }
}

/// Everything needed to run one list query against `R`.
///
/// Built once per request; every field reference has already been checked
/// against `R::FIELDS`.
#[derive(Debug)]
pub struct QueryDescriptor<R> {
    pub filter: Filter,
    pub selection: Selection,
    /// Never empty; the last key is always `id` so ordering is total.
    pub sort: Vec<SortKey>,
    pub page: PageRequest,
    pub populate: Vec<Populate>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for QueryDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            selection: self.selection.clone(),
            sort: self.sort.clone(),
            page: self.page,
            populate: self.populate.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> QueryDescriptor<R> {
    /// Unfiltered first page in default order.
    pub fn new(paging: PagingDefaults) -> Self {
        Self {
            filter: Filter::new(),
            selection: Selection::All,
            sort: default_sort::<R>(),
            page: PageRequest::first(paging),
            populate: Vec::new(),
            _resource: PhantomData,
        }
    }

    /// Translates decoded query-string pairs.
    ///
    /// `select` and `sort` take comma-separated field names (a leading `-`
    /// on a sort field means descending). `page` and `limit` never fail.
    /// Every other key is a filter: `field=value` for equality or
    /// `field[op]=value` with `op` one of `gt`, `gte`, `lt`, `lte`, `in`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] for unknown fields, unknown
    /// operators and values that do not parse for their field.
    pub fn from_pairs<K, V>(
        pairs: impl IntoIterator<Item = (K, V)>,
        paging: PagingDefaults,
    ) -> Result<Self, AppError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut descriptor = Self::new(paging);
        let mut page = None;
        let mut limit = None;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "select" => descriptor.selection = parse_selection::<R>(value)?,
                "sort" => descriptor.sort = parse_sort::<R>(value)?,
                "page" => page = Some(value.to_string()),
                "limit" => limit = Some(value.to_string()),
                _ => {
                    let (name, operator) = split_key(key)?;
                    let field = lookup::<R>(name)?;
                    descriptor
                        .filter
                        .push(Condition::parse(field, operator, value)?);
                }
            }
        }

        descriptor.page = PageRequest::from_params(page.as_deref(), limit.as_deref(), paging);
        Ok(descriptor)
    }

    /// Adds a route-supplied equality condition (e.g. the parent bootcamp id
    /// of a nested list).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServerError`] if `name` is not a field of `R`.
    pub fn with_condition(mut self, name: &str, value: FilterValue) -> Result<Self, AppError> {
        let field = R::field(name).ok_or_else(|| {
            tracing::error!(resource = R::NAME, field = name, "base filter on unknown field");
            AppError::server("Server Error")
        })?;
        self.filter.push(Condition::equals(field, value));
        Ok(self)
    }

    pub fn with_populate(mut self, populate: &[Populate]) -> Self {
        self.populate.extend_from_slice(populate);
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

fn lookup<R: Resource>(name: &str) -> Result<&'static Field, AppError> {
    R::field(name).ok_or_else(|| {
        AppError::validation(format!("Unknown field '{name}' for {}", R::NAME))
    })
}

/// Splits `price[gte]` into (`price`, Gte); a bare key is equality.
fn split_key(key: &str) -> Result<(&str, Operator), AppError> {
    let Some(open) = key.find('[') else {
        return Ok((key, Operator::Eq));
    };

    let name = &key[..open];
    let token = key[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| AppError::validation(format!("Malformed filter key '{key}'")))?;

    let operator = Operator::from_token(token)
        .ok_or_else(|| AppError::validation(format!("Unknown operator '{token}' in '{key}'")))?;

    Ok((name, operator))
}

fn parse_selection<R: Resource>(raw: &str) -> Result<Selection, AppError> {
    let mut fields: Vec<&'static Field> = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let field = lookup::<R>(name)?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    if fields.is_empty() {
        return Ok(Selection::All);
    }

    if !fields.iter().any(|f| f.name == "id") {
        fields.insert(0, lookup::<R>("id")?);
    }

    Ok(Selection::Fields(fields))
}

fn parse_sort<R: Resource>(raw: &str) -> Result<Vec<SortKey>, AppError> {
    let mut keys = Vec::new();

    for token in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, direction) = match token.strip_prefix('-') {
            Some(name) => (name, Direction::Desc),
            None => (token, Direction::Asc),
        };
        keys.push(SortKey {
            field: lookup::<R>(name)?,
            direction,
        });
    }

    if keys.is_empty() {
        return Ok(default_sort::<R>());
    }

    push_tie_break::<R>(&mut keys);
    Ok(keys)
}

fn default_sort<R: Resource>() -> Vec<SortKey> {
    let mut keys = Vec::new();
    let (name, direction) = match R::DEFAULT_SORT.strip_prefix('-') {
        Some(name) => (name, Direction::Desc),
        None => (R::DEFAULT_SORT, Direction::Asc),
    };

    if let Some(field) = R::field(name) {
        keys.push(SortKey { field, direction });
    }

    push_tie_break::<R>(&mut keys);
    keys
}

fn push_tie_break<R: Resource>(keys: &mut Vec<SortKey>) {
    if keys.iter().any(|k| k.field.name == "id") {
        return;
    }

    if let Some(id) = R::field("id") {
        let direction = keys.first().map_or(Direction::Asc, |k| k.direction);
        keys.push(SortKey {
            field: id,
            direction,
        });
    }
}
