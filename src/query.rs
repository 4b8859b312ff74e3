//! Pure listing pipeline: parse the raw query string into a `ListQuery`,
//! then apply it to the fetched documents. Handlers thread the result
//! explicitly instead of reading it off ambient request state.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_LIMIT: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
}

impl FilterOp {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(FilterOp::Gt),
            "gte" => Some(FilterOp::Gte),
            "lt" => Some(FilterOp::Lt),
            "lte" => Some(FilterOp::Lte),
            "ne" => Some(FilterOp::Ne),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub select: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u32,
    pub limit: u32,
}

/// Collection envelope with pagination descriptors.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub success: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    pub data: Vec<Value>,
}

/// Parses URL query parameters. `select`, `sort`, `page` and `limit` are
/// reserved; everything else becomes a filter, with `field[op]` bracket
/// suffixes mapped to comparison operators.
pub fn parse(params: &HashMap<String, String>) -> ListQuery {
    let mut filters = Vec::new();
    let mut select = None;
    let mut sort = Vec::new();
    let mut page = 1u32;
    let mut limit = DEFAULT_LIMIT;

    for (key, value) in params {
        match key.as_str() {
            "select" => {
                let fields: Vec<String> = value
                    .split(',')
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty())
                    .collect();
                if !fields.is_empty() {
                    select = Some(fields);
                }
            }
            "sort" => {
                for field in value.split(',') {
                    let field = field.trim();
                    if field.is_empty() {
                        continue;
                    }
                    match field.strip_prefix('-') {
                        Some(rest) => sort.push(SortKey {
                            field: rest.to_string(),
                            descending: true,
                        }),
                        None => sort.push(SortKey {
                            field: field.to_string(),
                            descending: false,
                        }),
                    }
                }
            }
            "page" => {
                page = value.parse::<u32>().unwrap_or(1).max(1);
            }
            "limit" => {
                limit = value.parse::<u32>().unwrap_or(DEFAULT_LIMIT).max(1);
            }
            _ => {
                let (field, op) = match (key.find('['), key.ends_with(']')) {
                    (Some(open), true) => {
                        let suffix = &key[open + 1..key.len() - 1];
                        match FilterOp::from_suffix(suffix) {
                            Some(op) => (key[..open].to_string(), op),
                            // Unknown bracket suffix, treat the whole key as
                            // an equality on a literal field name.
                            None => (key.clone(), FilterOp::Eq),
                        }
                    }
                    _ => (key.clone(), FilterOp::Eq),
                };
                filters.push(Filter {
                    field,
                    op,
                    value: value.clone(),
                });
            }
        }
    }

    // Stable default ordering: newest first.
    if sort.is_empty() {
        sort.push(SortKey {
            field: "created_at".to_string(),
            descending: true,
        });
    }

    ListQuery {
        filters,
        select,
        sort,
        page,
        limit,
    }
}

/// Applies filters, sorting, projection and pagination to the documents and
/// returns the page plus `previous`/`next` descriptors and the total count.
pub fn run(query: &ListQuery, items: Vec<Value>) -> Listing {
    let mut matched: Vec<Value> = items
        .into_iter()
        .filter(|item| query.filters.iter().all(|f| matches(item, f)))
        .collect();

    matched.sort_by(|a, b| {
        for key in &query.sort {
            let ord = compare(lookup(a, &key.field), lookup(b, &key.field));
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    let total = matched.len();
    let start = (query.page as usize - 1) * query.limit as usize;
    let end = (start + query.limit as usize).min(total);

    let previous = (start > 0 && total > 0).then(|| PageRef {
        page: query.page - 1,
        limit: query.limit,
    });
    let next = (end < total).then(|| PageRef {
        page: query.page + 1,
        limit: query.limit,
    });

    let mut data: Vec<Value> = if start < total {
        matched.drain(start..end).collect()
    } else {
        Vec::new()
    };

    if let Some(fields) = &query.select {
        for item in &mut data {
            project(item, fields);
        }
    }

    Listing {
        success: true,
        count: total,
        previous,
        next,
        data,
    }
}

/// Resolves a possibly dotted field path inside a document.
fn lookup<'a>(item: &'a Value, path: &str) -> &'a Value {
    let mut current = item;
    for part in path.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return &Value::Null,
        }
    }
    current
}

fn matches(item: &Value, filter: &Filter) -> bool {
    let target = lookup(item, &filter.field);

    // Equality against an array field matches any element.
    if let Value::Array(elements) = target {
        let hit = elements.iter().any(|e| value_eq(e, &filter.value));
        return match filter.op {
            FilterOp::Eq => hit,
            FilterOp::Ne => !hit,
            _ => false,
        };
    }

    match filter.op {
        FilterOp::Eq => value_eq(target, &filter.value),
        FilterOp::Ne => !value_eq(target, &filter.value),
        op => {
            let ord = match numeric_pair(target, &filter.value) {
                Some((a, b)) => a.partial_cmp(&b),
                None => target.as_str().map(|s| s.cmp(filter.value.as_str())),
            };
            match ord {
                Some(ord) => match op {
                    FilterOp::Gt => ord == Ordering::Greater,
                    FilterOp::Gte => ord != Ordering::Less,
                    FilterOp::Lt => ord == Ordering::Less,
                    FilterOp::Lte => ord != Ordering::Greater,
                    _ => unreachable!(),
                },
                None => false,
            }
        }
    }
}

fn value_eq(target: &Value, raw: &str) -> bool {
    match target {
        Value::String(s) => s == raw,
        Value::Bool(b) => raw.parse::<bool>().map(|r| r == *b).unwrap_or(false),
        Value::Number(n) => n
            .as_f64()
            .zip(raw.parse::<f64>().ok())
            .map(|(a, b)| a == b)
            .unwrap_or(false),
        _ => false,
    }
}

fn numeric_pair(target: &Value, raw: &str) -> Option<(f64, f64)> {
    let a = match target {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }?;
    let b = raw.parse::<f64>().ok()?;
    Some((a, b))
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Field projection. The id is always kept, matching the usual document-store
/// behavior.
fn project(item: &mut Value, fields: &[String]) {
    if let Value::Object(map) = item {
        map.retain(|key, _| key == "id" || fields.iter().any(|f| f == key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn docs(costs: &[f64]) -> Vec<Value> {
        costs
            .iter()
            .enumerate()
            .map(|(i, c)| {
                json!({
                    "id": format!("id-{i}"),
                    "name": format!("Camp {i}"),
                    "average_cost": c,
                    "created_at": format!("2024-01-{:02}T00:00:00Z", i + 1),
                })
            })
            .collect()
    }

    #[test]
    fn bracket_suffix_becomes_comparison_operator() {
        let query = parse(&params(&[("cost[gte]", "1000")]));
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].field, "cost");
        assert_eq!(query.filters[0].op, FilterOp::Gte);
        assert_eq!(query.filters[0].value, "1000");
    }

    #[test]
    fn plain_parameter_is_equality() {
        let query = parse(&params(&[("housing", "true")]));
        assert_eq!(query.filters[0].op, FilterOp::Eq);
    }

    #[test]
    fn defaults_are_page_1_limit_25_created_at_desc() {
        let query = parse(&params(&[]));
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 25);
        assert_eq!(query.sort.len(), 1);
        assert_eq!(query.sort[0].field, "created_at");
        assert!(query.sort[0].descending);
    }

    #[test]
    fn gte_filter_keeps_exactly_matching_records() {
        let query = parse(&params(&[("average_cost[gte]", "1000")]));
        let listing = run(
            &query,
            docs(&[500.0, 999.0, 1000.0, 1500.0, 12000.0]),
        );
        assert_eq!(listing.count, 3);
        for item in &listing.data {
            assert!(item["average_cost"].as_f64().unwrap() >= 1000.0);
        }
    }

    #[test]
    fn ne_filter_excludes_matches() {
        let query = parse(&params(&[("average_cost[ne]", "1000")]));
        let listing = run(&query, docs(&[1000.0, 2000.0]));
        assert_eq!(listing.count, 1);
        assert_eq!(listing.data[0]["average_cost"], json!(2000.0));
    }

    #[test]
    fn dotted_path_reaches_nested_fields() {
        let query = parse(&params(&[("location.city", "Boston")]));
        let items = vec![
            json!({"id": "a", "location": {"city": "Boston"}}),
            json!({"id": "b", "location": {"city": "Lowell"}}),
            json!({"id": "c"}),
        ];
        let listing = run(&query, items);
        assert_eq!(listing.count, 1);
        assert_eq!(listing.data[0]["id"], json!("a"));
    }

    #[test]
    fn equality_on_array_field_matches_any_element() {
        let query = parse(&params(&[("careers", "Business")]));
        let items = vec![
            json!({"id": "a", "careers": ["Web Development", "Business"]}),
            json!({"id": "b", "careers": ["UI/UX"]}),
        ];
        let listing = run(&query, items);
        assert_eq!(listing.count, 1);
        assert_eq!(listing.data[0]["id"], json!("a"));
    }

    #[test]
    fn sort_prefix_dash_means_descending() {
        let query = parse(&params(&[("sort", "-average_cost")]));
        let listing = run(&query, docs(&[100.0, 300.0, 200.0]));
        let costs: Vec<f64> = listing
            .data
            .iter()
            .map(|v| v["average_cost"].as_f64().unwrap())
            .collect();
        assert_eq!(costs, vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn default_sort_is_newest_first() {
        let query = parse(&params(&[]));
        let listing = run(&query, docs(&[1.0, 2.0, 3.0]));
        assert_eq!(listing.data[0]["id"], json!("id-2"));
        assert_eq!(listing.data[2]["id"], json!("id-0"));
    }

    #[test]
    fn select_projects_fields_and_keeps_id() {
        let query = parse(&params(&[("select", "name")]));
        let listing = run(&query, docs(&[100.0]));
        let obj = listing.data[0].as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("name"));
    }

    #[test]
    fn first_page_of_thirty_has_next_and_no_previous() {
        let query = parse(&params(&[("page", "1"), ("limit", "10")]));
        let costs: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let listing = run(&query, docs(&costs));

        assert_eq!(listing.count, 30);
        assert_eq!(listing.data.len(), 10);
        assert_eq!(listing.previous, None);
        assert_eq!(listing.next, Some(PageRef { page: 2, limit: 10 }));
    }

    #[test]
    fn last_page_of_thirty_has_previous_and_no_next() {
        let query = parse(&params(&[("page", "3"), ("limit", "10")]));
        let costs: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let listing = run(&query, docs(&costs));

        assert_eq!(listing.data.len(), 10);
        assert_eq!(listing.previous, Some(PageRef { page: 2, limit: 10 }));
        assert_eq!(listing.next, None);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_count() {
        let query = parse(&params(&[("page", "5"), ("limit", "10")]));
        let listing = run(&query, docs(&[1.0, 2.0]));
        assert_eq!(listing.count, 2);
        assert!(listing.data.is_empty());
        assert_eq!(listing.next, None);
    }
}
