use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

/// Raw query parameters accepted by the public listing route. All three are
/// independent and optional; `limit` stays a string so that a non-numeric
/// value falls back to "no cap" instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListCarsParams {
    pub sort: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
}

/// Price ordering for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
}

/// Filter, ordering and cap for a listing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarQuery {
    /// `sort=asc` / `sort=dsc`; anything else leaves natural order.
    pub sort: Option<PriceSort>,
    /// Case-insensitive substring matched against brand, model or location.
    pub search: Option<String>,
    /// Result cap. Only positive values cap; zero, negative and non-numeric
    /// values mean "return all matches".
    pub limit: Option<i64>,
}

impl CarQuery {
    /// Builds a `CarQuery` from the raw request parameters.
    pub fn from_params(params: &ListCarsParams) -> Self {
        let sort = match params.sort.as_deref() {
            Some("asc") => Some(PriceSort::Ascending),
            Some("dsc") => Some(PriceSort::Descending),
            _ => None,
        };

        let search = params
            .search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        let limit = params
            .limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|n| *n > 0);

        Self { sort, search, limit }
    }

    /// Appends the WHERE / ORDER BY / LIMIT clauses onto a partial SELECT.
    ///
    /// The search term matches as a substring anywhere in brand, model or
    /// location; filtering applies first, then ordering, then the cap.
    pub fn push_onto(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if let Some(term) = &self.search {
            let pattern = format!("%{}%", escape_like(term));
            builder.push(" WHERE (brand ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR model ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR location ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        match self.sort {
            Some(PriceSort::Ascending) => {
                builder.push(" ORDER BY price ASC");
            }
            Some(PriceSort::Descending) => {
                builder.push(" ORDER BY price DESC");
            }
            None => {}
        }

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
    }
}

/// Escapes LIKE metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
