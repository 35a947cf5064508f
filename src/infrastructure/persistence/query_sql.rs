//! Renders a [`QueryDescriptor`] into PostgreSQL via `sqlx::QueryBuilder`.
//!
//! Column names come only from the static field tables, every value is bound.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::domain::query::{
    Condition, Direction, FieldKind, Filter, FilterValue, Operand, Operator, QueryDescriptor,
    Resource, SortKey,
};
use crate::error::AppError;

/// Fetches the page of `R` described by `query`. Rows are always loaded
/// whole; field selection happens on the serialized output.
pub(crate) async fn fetch_page<R>(pool: &PgPool, query: &QueryDescriptor<R>) -> Result<Vec<R>, AppError>
where
    R: Resource + for<'r> FromRow<'r, PgRow> + Unpin,
{
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", R::TABLE));
    push_filter(&mut qb, &query.filter);
    push_order(&mut qb, &query.sort);
    qb.push(" LIMIT ")
        .push_bind(i64::from(query.page.limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.page.start_index()).unwrap_or(i64::MAX));

    tracing::debug!(table = R::TABLE, sql = qb.sql(), "list query");
    metrics::counter!("query_executions_total", "resource" => R::NAME).increment(1);

    let rows = qb.build_query_as::<R>().fetch_all(pool).await?;
    Ok(rows)
}

/// Counts rows of `table` matching `filter`.
pub(crate) async fn count_matching(pool: &PgPool, table: &str, filter: &Filter) -> Result<u64, AppError> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {table}"));
    push_filter(&mut qb, filter);

    let total: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(u64::try_from(total).unwrap_or_default())
}

pub(crate) fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for (i, condition) in filter.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_condition(qb, condition);
    }
}

fn push_condition(qb: &mut QueryBuilder<'_, Postgres>, condition: &Condition) {
    let column = condition.field.column;

    match (condition.field.kind, condition.operator, &condition.operand) {
        // list contains value
        (FieldKind::TextList, _, Operand::One(value)) => {
            push_value(qb, value);
            qb.push(format!(" = ANY({column})"));
        }
        // list overlaps values
        (FieldKind::TextList, _, Operand::Many(values)) => {
            qb.push(format!("{column} && "));
            push_values(qb, values);
        }
        (_, operator, Operand::One(value)) => {
            qb.push(format!("{column} {} ", sql_operator(operator)));
            push_value(qb, value);
        }
        (_, _, Operand::Many(values)) => {
            qb.push(format!("{column} = ANY("));
            push_values(qb, values);
            qb.push(")");
        }
    }
}

fn sql_operator(operator: Operator) -> &'static str {
    match operator {
        Operator::Eq | Operator::In => "=",
        Operator::Gt => ">",
        Operator::Gte => ">=",
        Operator::Lt => "<",
        Operator::Lte => "<=",
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Text(v) => qb.push_bind(v.clone()),
        FilterValue::Integer(v) => qb.push_bind(*v),
        FilterValue::Float(v) => qb.push_bind(*v),
        FilterValue::Boolean(v) => qb.push_bind(*v),
        FilterValue::Timestamp(v) => qb.push_bind(*v),
    };
}

/// Binds a homogeneous list as one array parameter.
fn push_values(qb: &mut QueryBuilder<'_, Postgres>, values: &[FilterValue]) {
    match values.first() {
        Some(FilterValue::Integer(_)) => {
            qb.push_bind(collect(values, |v| match v {
                FilterValue::Integer(i) => Some(*i),
                _ => None,
            }));
        }
        Some(FilterValue::Float(_)) => {
            qb.push_bind(collect(values, |v| match v {
                FilterValue::Float(f) => Some(*f),
                _ => None,
            }));
        }
        Some(FilterValue::Boolean(_)) => {
            qb.push_bind(collect(values, |v| match v {
                FilterValue::Boolean(b) => Some(*b),
                _ => None,
            }));
        }
        Some(FilterValue::Timestamp(_)) => {
            qb.push_bind(collect::<DateTime<Utc>>(values, |v| match v {
                FilterValue::Timestamp(t) => Some(*t),
                _ => None,
            }));
        }
        Some(FilterValue::Text(_)) | None => {
            qb.push_bind(collect(values, |v| match v {
                FilterValue::Text(s) => Some(s.clone()),
                _ => None,
            }));
        }
    }
}

fn collect<T>(values: &[FilterValue], pick: impl Fn(&FilterValue) -> Option<T>) -> Vec<T> {
    values.iter().filter_map(pick).collect()
}

pub(crate) fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: &[SortKey]) {
    for (i, key) in sort.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(key.field.column);
        qb.push(match key.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
    }
}
