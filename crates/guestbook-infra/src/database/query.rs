//! Generic filter and pagination building blocks.
//!
//! Every list endpoint goes through the same mechanism: optional
//! predicates narrow the base query progressively, the sort field is
//! resolved against a per-entity allow-list, and offset/limit pagination
//! is applied last.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, IdenStatic, Order, QueryFilter, QueryOrder, QuerySelect, Select,
};

use guestbook_core::RepoError;
use guestbook_core::paging::{Pager, SortDirection};

/// Converts a milliseconds-since-epoch bound into a timestamp the
/// database can compare against.
pub fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

/// Applies an inclusive time range on `column`. Absent bounds impose no
/// condition.
pub fn time_range<E: EntityTrait>(
    mut select: Select<E>,
    column: E::Column,
    from_ms: Option<i64>,
    to_ms: Option<i64>,
) -> Select<E> {
    if let Some(from) = from_ms {
        select = select.filter(column.gte(millis_to_utc(from)));
    }
    if let Some(to) = to_ms {
        select = select.filter(column.lte(millis_to_utc(to)));
    }
    select
}

/// Resolves the requested sort field against the entity's allow-list.
///
/// Unknown fields are rejected rather than forwarded into the query; a
/// missing request falls back to the entity default.
pub fn resolve_sort<C: ColumnTrait>(
    requested: Option<&str>,
    allowed: &[C],
    default: C,
) -> Result<C, RepoError> {
    match requested {
        None => Ok(default),
        Some(name) => allowed
            .iter()
            .find(|column| column.as_str() == name)
            .copied()
            .ok_or_else(|| RepoError::InvalidFilter(format!("cannot sort by `{name}`"))),
    }
}

/// Applies sort and 1-based offset/limit pagination to a query.
pub fn paginate<E: EntityTrait>(
    select: Select<E>,
    pager: &Pager,
    allowed: &[E::Column],
    default: E::Column,
    max_size: u64,
) -> Result<Select<E>, RepoError> {
    let column = resolve_sort(pager.sort_by.as_deref(), allowed, default)?;
    let order = match pager.sort_dir {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    Ok(select
        .order_by(column, order)
        .offset(pager.offset(max_size))
        .limit(pager.limit(max_size)))
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::super::entity::todo;
    use super::*;

    fn sql<E: EntityTrait>(select: Select<E>) -> String {
        select.build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn empty_filter_leaves_the_base_query_untouched() {
        let base = todo::Entity::find();
        let filtered = time_range(base.clone(), todo::Column::CreatedAt, None, None);

        assert_eq!(sql(base), sql(filtered));
    }

    #[test]
    fn time_range_is_inclusive_on_both_bounds() {
        let base = todo::Entity::find();
        let filtered = time_range(
            base,
            todo::Column::CreatedAt,
            Some(1_700_000_000_000),
            Some(1_700_100_000_000),
        );
        let sql = sql(filtered);

        assert!(sql.contains(">="), "missing inclusive lower bound: {sql}");
        assert!(sql.contains("<="), "missing inclusive upper bound: {sql}");
        // 1700000000000 ms == 2023-11-14T22:13:20Z
        assert!(sql.contains("22:13:20"), "unexpected bound value: {sql}");
    }

    #[test]
    fn one_sided_ranges_add_a_single_condition() {
        let lower_only = time_range(
            todo::Entity::find(),
            todo::Column::CreatedAt,
            Some(1_700_000_000_000),
            None,
        );
        let sql = sql(lower_only);

        assert!(sql.contains(">="));
        assert!(!sql.contains("<="));
    }

    #[test]
    fn pagination_uses_one_based_offset_arithmetic() {
        let pager = Pager {
            page: 3,
            size: 10,
            ..Pager::default()
        };
        let select = paginate(
            todo::Entity::find(),
            &pager,
            &[todo::Column::Id, todo::Column::CreatedAt],
            todo::Column::CreatedAt,
            200,
        )
        .unwrap();
        let sql = sql(select);

        assert!(sql.contains("LIMIT 10"), "bad limit: {sql}");
        assert!(sql.contains("OFFSET 20"), "bad offset: {sql}");
        assert!(sql.contains("ORDER BY"), "missing sort: {sql}");
    }

    #[test]
    fn allow_listed_sort_field_is_accepted() {
        let pager = Pager {
            sort_by: Some("name".to_owned()),
            sort_dir: SortDirection::Asc,
            ..Pager::default()
        };
        let select = paginate(
            todo::Entity::find(),
            &pager,
            &[todo::Column::Id, todo::Column::Name],
            todo::Column::Id,
            200,
        )
        .unwrap();
        let sql = sql(select);

        assert!(sql.contains(r#""name" ASC"#), "bad sort column: {sql}");
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let pager = Pager {
            sort_by: Some("password".to_owned()),
            ..Pager::default()
        };
        let err = paginate(
            todo::Entity::find(),
            &pager,
            &[todo::Column::Id, todo::Column::Name],
            todo::Column::Id,
            200,
        )
        .unwrap_err();

        assert!(matches!(err, RepoError::InvalidFilter(_)));
    }

    #[test]
    fn page_size_is_clamped_by_the_configured_maximum() {
        let pager = Pager {
            size: 10_000,
            ..Pager::default()
        };
        let select = paginate(
            todo::Entity::find(),
            &pager,
            &[todo::Column::Id],
            todo::Column::Id,
            200,
        )
        .unwrap();
        let sql = sql(select);

        assert!(sql.contains("LIMIT 200"), "limit not clamped: {sql}");
    }
}
