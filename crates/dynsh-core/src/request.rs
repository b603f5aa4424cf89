//! Request building.
//!
//! Each builder creates one [`ExpressionTranslator`] for the command and
//! feeds it the command's expressions in a fixed order: key condition, filter,
//! projection, update, condition. The resulting side-tables are moved into
//! the input, so every placeholder in every expression of the command is
//! defined exactly once.

use dynsh_expr::{ExpressionTranslator, parse_literal};
use dynsh_model::input::{
    DeleteItemInput, DescribeTableInput, GetItemInput, Item, PutItemInput, QueryInput, ScanInput,
    UpdateItemInput,
};
use dynsh_model::{DynamoDBOperation, ReturnConsumedCapacity, ReturnValue, Select};
use serde::Serialize;
use tracing::debug;

use crate::error::{DynshError, DynshResult};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Arguments of the `query` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Key condition, e.g. `pk = 'a' AND begins_with(sk, 'b')`.
    pub key_condition: String,
    /// Filter applied after the key condition.
    pub filter: Option<String>,
    /// Comma-separated attribute paths to return.
    pub projection: Option<String>,
    /// Secondary index to query.
    pub index: Option<String>,
    /// Request a strongly consistent read.
    pub consistent_read: bool,
    /// Attributes to return.
    pub select: Option<Select>,
    /// Maximum number of items to evaluate.
    pub limit: Option<i32>,
    /// Traverse the index in descending order.
    pub reverse: bool,
    /// Level of consumed capacity detail.
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

/// Arguments of the `scan` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanArgs {
    /// Filter expression.
    pub filter: Option<String>,
    /// Comma-separated attribute paths to return.
    pub projection: Option<String>,
    /// Secondary index to scan.
    pub index: Option<String>,
    /// Request a strongly consistent read.
    pub consistent_read: bool,
    /// Attributes to return.
    pub select: Option<Select>,
    /// Maximum number of items to evaluate.
    pub limit: Option<i32>,
    /// Segment of a parallel scan.
    pub segment: Option<i32>,
    /// Total segments of a parallel scan.
    pub total_segments: Option<i32>,
    /// Level of consumed capacity detail.
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

/// Arguments of the `get` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetArgs {
    /// Primary key as a map literal, e.g. `{pk: 'a', sk: 1}`.
    pub key: String,
    /// Comma-separated attribute paths to return.
    pub projection: Option<String>,
    /// Request a strongly consistent read.
    pub consistent_read: bool,
}

/// Arguments of the `put` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutArgs {
    /// The whole item as a map literal.
    pub item: String,
    /// Condition that must hold for the put to succeed.
    pub condition: Option<String>,
    /// Attributes to return.
    pub return_values: Option<ReturnValue>,
}

/// Arguments of the `update` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateArgs {
    /// Primary key as a map literal.
    pub key: String,
    /// Update expression, e.g. `SET a = a + 1 REMOVE b`.
    pub update: String,
    /// Condition that must hold for the update to succeed.
    pub condition: Option<String>,
    /// Attributes to return.
    pub return_values: Option<ReturnValue>,
}

/// Arguments of the `delete` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Primary key as a map literal.
    pub key: String,
    /// Condition that must hold for the delete to succeed.
    pub condition: Option<String>,
    /// Attributes to return.
    pub return_values: Option<ReturnValue>,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A fully translated request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DynamoRequest {
    /// `DescribeTable`.
    DescribeTable(DescribeTableInput),
    /// `Query`.
    Query(QueryInput),
    /// `Scan`.
    Scan(ScanInput),
    /// `GetItem`.
    GetItem(GetItemInput),
    /// `PutItem`.
    PutItem(PutItemInput),
    /// `UpdateItem`.
    UpdateItem(UpdateItemInput),
    /// `DeleteItem`.
    DeleteItem(DeleteItemInput),
}

impl DynamoRequest {
    /// The operation this request invokes.
    #[must_use]
    pub fn operation(&self) -> DynamoDBOperation {
        match self {
            Self::DescribeTable(_) => DynamoDBOperation::DescribeTable,
            Self::Query(_) => DynamoDBOperation::Query,
            Self::Scan(_) => DynamoDBOperation::Scan,
            Self::GetItem(_) => DynamoDBOperation::GetItem,
            Self::PutItem(_) => DynamoDBOperation::PutItem,
            Self::UpdateItem(_) => DynamoDBOperation::UpdateItem,
            Self::DeleteItem(_) => DynamoDBOperation::DeleteItem,
        }
    }

    /// Value of the `X-Amz-Target` header.
    #[must_use]
    pub fn target(&self) -> String {
        self.operation().target()
    }

    /// The request body as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DynshError::Internal`] if serialization fails.
    pub fn to_value(&self) -> DynshResult<serde_json::Value> {
        Ok(serde_json::to_value(self).map_err(anyhow::Error::from)?)
    }

    /// The request body as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DynshError::Internal`] if serialization fails.
    pub fn to_json(&self) -> DynshResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build a `DescribeTable` request.
#[must_use]
pub fn build_describe(table: &str) -> DynamoRequest {
    debug!(table, "built DescribeTable request");
    DynamoRequest::DescribeTable(DescribeTableInput {
        table_name: table.to_owned(),
    })
}

/// Build a `Query` request.
///
/// # Errors
///
/// Returns [`DynshError::MissingArgument`] for a blank key condition and
/// [`DynshError::Expression`] if any expression fails to translate.
pub fn build_query(table: &str, args: &QueryArgs) -> DynshResult<DynamoRequest> {
    let mut tr = ExpressionTranslator::new();
    let key_condition = tr
        .translate_expression(&args.key_condition)?
        .ok_or(DynshError::MissingArgument("key condition"))?;
    let filter = translate(&mut tr, args.filter.as_deref())?;
    let projection = project(&mut tr, args.projection.as_deref())?;
    let (names, values) = tr.into_context().into_parts();

    let input = QueryInput {
        table_name: table.to_owned(),
        index_name: args.index.clone(),
        key_condition_expression: Some(key_condition),
        filter_expression: filter,
        projection_expression: projection,
        expression_attribute_names: names,
        expression_attribute_values: values,
        scan_index_forward: args.reverse.then_some(false),
        limit: args.limit,
        select: args.select,
        consistent_read: args.consistent_read.then_some(true),
        return_consumed_capacity: args.return_consumed_capacity,
    };
    debug!(table, ?input, "built Query request");
    Ok(DynamoRequest::Query(input))
}

/// Build a `Scan` request.
///
/// # Errors
///
/// Returns [`DynshError::Expression`] if the filter or projection fails to
/// translate.
pub fn build_scan(table: &str, args: &ScanArgs) -> DynshResult<DynamoRequest> {
    let mut tr = ExpressionTranslator::new();
    let filter = translate(&mut tr, args.filter.as_deref())?;
    let projection = project(&mut tr, args.projection.as_deref())?;
    let (names, values) = tr.into_context().into_parts();

    let input = ScanInput {
        table_name: table.to_owned(),
        index_name: args.index.clone(),
        filter_expression: filter,
        projection_expression: projection,
        expression_attribute_names: names,
        expression_attribute_values: values,
        limit: args.limit,
        segment: args.segment,
        total_segments: args.total_segments,
        select: args.select,
        consistent_read: args.consistent_read.then_some(true),
        return_consumed_capacity: args.return_consumed_capacity,
    };
    debug!(table, ?input, "built Scan request");
    Ok(DynamoRequest::Scan(input))
}

/// Build a `GetItem` request.
///
/// # Errors
///
/// Returns [`DynshError::InvalidKey`] if the key is not a non-empty map and
/// [`DynshError::Expression`] if the key or projection fails to parse.
pub fn build_get(table: &str, args: &GetArgs) -> DynshResult<DynamoRequest> {
    let key = parse_key(&args.key)?;
    let mut tr = ExpressionTranslator::new();
    let projection = project(&mut tr, args.projection.as_deref())?;
    let (names, _) = tr.into_context().into_parts();

    let input = GetItemInput {
        table_name: table.to_owned(),
        key,
        consistent_read: args.consistent_read.then_some(true),
        projection_expression: projection,
        expression_attribute_names: names,
    };
    debug!(table, ?input, "built GetItem request");
    Ok(DynamoRequest::GetItem(input))
}

/// Build a `PutItem` request.
///
/// # Errors
///
/// Returns [`DynshError::InvalidItem`] if the item is not a non-empty map and
/// [`DynshError::Expression`] if the item or condition fails to parse.
pub fn build_put(table: &str, args: &PutArgs) -> DynshResult<DynamoRequest> {
    let item = parse_item(&args.item)?;
    let mut tr = ExpressionTranslator::new();
    let condition = translate(&mut tr, args.condition.as_deref())?;
    let (names, values) = tr.into_context().into_parts();

    let input = PutItemInput {
        table_name: table.to_owned(),
        item,
        condition_expression: condition,
        expression_attribute_names: names,
        expression_attribute_values: values,
        return_values: args.return_values,
    };
    debug!(table, ?input, "built PutItem request");
    Ok(DynamoRequest::PutItem(input))
}

/// Build an `UpdateItem` request.
///
/// # Errors
///
/// Returns [`DynshError::MissingArgument`] for a blank update expression,
/// [`DynshError::InvalidKey`] for a bad key and [`DynshError::Expression`] if
/// any expression fails to translate.
pub fn build_update(table: &str, args: &UpdateArgs) -> DynshResult<DynamoRequest> {
    let key = parse_key(&args.key)?;
    let mut tr = ExpressionTranslator::new();
    let update = tr
        .translate_expression(&args.update)?
        .ok_or(DynshError::MissingArgument("update expression"))?;
    let condition = translate(&mut tr, args.condition.as_deref())?;
    let (names, values) = tr.into_context().into_parts();

    let input = UpdateItemInput {
        table_name: table.to_owned(),
        key,
        update_expression: Some(update),
        condition_expression: condition,
        expression_attribute_names: names,
        expression_attribute_values: values,
        return_values: args.return_values,
    };
    debug!(table, ?input, "built UpdateItem request");
    Ok(DynamoRequest::UpdateItem(input))
}

/// Build a `DeleteItem` request.
///
/// # Errors
///
/// Returns [`DynshError::InvalidKey`] for a bad key and
/// [`DynshError::Expression`] if the key or condition fails to parse.
pub fn build_delete(table: &str, args: &DeleteArgs) -> DynshResult<DynamoRequest> {
    let key = parse_key(&args.key)?;
    let mut tr = ExpressionTranslator::new();
    let condition = translate(&mut tr, args.condition.as_deref())?;
    let (names, values) = tr.into_context().into_parts();

    let input = DeleteItemInput {
        table_name: table.to_owned(),
        key,
        condition_expression: condition,
        expression_attribute_names: names,
        expression_attribute_values: values,
        return_values: args.return_values,
    };
    debug!(table, ?input, "built DeleteItem request");
    Ok(DynamoRequest::DeleteItem(input))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn translate(tr: &mut ExpressionTranslator, raw: Option<&str>) -> DynshResult<Option<String>> {
    match raw {
        Some(raw) => Ok(tr.translate_expression(raw)?),
        None => Ok(None),
    }
}

fn project(tr: &mut ExpressionTranslator, raw: Option<&str>) -> DynshResult<Option<String>> {
    match raw {
        Some(raw) => Ok(tr.translate_projection(raw)?),
        None => Ok(None),
    }
}

/// Parses a map literal, returning `Err(reason)` if it is not a non-empty map.
fn parse_map_literal(raw: &str, what: &'static str) -> DynshResult<Result<Item, String>> {
    if raw.trim().is_empty() {
        return Err(DynshError::MissingArgument(what));
    }
    let value = parse_literal(raw)?;
    let descriptor = value.type_descriptor();
    Ok(match value.into_m() {
        Some(map) if map.is_empty() => Err("map must not be empty".to_owned()),
        Some(map) => Ok(map),
        None => Err(format!("expected a map literal, found {descriptor}")),
    })
}

/// Parses a primary key literal such as `{pk: 'a', sk: 1}`.
///
/// # Errors
///
/// Returns [`DynshError::MissingArgument`] for blank input,
/// [`DynshError::Expression`] if the literal is malformed and
/// [`DynshError::InvalidKey`] if it is not a non-empty map.
pub fn parse_key(raw: &str) -> DynshResult<Item> {
    parse_map_literal(raw, "key")?.map_err(|reason| DynshError::InvalidKey { reason })
}

/// Parses an item literal.
///
/// # Errors
///
/// Returns [`DynshError::MissingArgument`] for blank input,
/// [`DynshError::Expression`] if the literal is malformed and
/// [`DynshError::InvalidItem`] if it is not a non-empty map.
pub fn parse_item(raw: &str) -> DynshResult<Item> {
    parse_map_literal(raw, "item")?.map_err(|reason| DynshError::InvalidItem { reason })
}

#[cfg(test)]
mod tests {
    use dynsh_expr::ExpressionError;
    use dynsh_model::AttributeValue;

    use super::*;

    fn query(key_condition: &str) -> QueryArgs {
        QueryArgs {
            key_condition: key_condition.to_owned(),
            ..QueryArgs::default()
        }
    }

    #[test]
    fn test_should_build_query_with_shared_placeholders() {
        let args = QueryArgs {
            filter: Some("field0 = 'aValue'".to_owned()),
            projection: Some("pk, field0".to_owned()),
            ..query("pk = 'someStr'")
        };
        let DynamoRequest::Query(input) = build_query("users", &args).unwrap() else {
            panic!("expected a Query request");
        };

        assert_eq!(input.table_name, "users");
        assert_eq!(input.key_condition_expression.as_deref(), Some("#0 = :0"));
        assert_eq!(input.filter_expression.as_deref(), Some("#1 = :1"));
        assert_eq!(input.projection_expression.as_deref(), Some("#2,#3"));

        let names = input.expression_attribute_names.unwrap();
        let names: Vec<_> = names.values().map(String::as_str).collect();
        assert_eq!(names, vec!["pk", "field0", "pk", "field0"]);
        assert_eq!(input.expression_attribute_values.unwrap().len(), 2);
    }

    #[test]
    fn test_should_map_query_flags() {
        let args = QueryArgs {
            index: Some("by_email".to_owned()),
            consistent_read: true,
            reverse: true,
            limit: Some(10),
            select: Some(Select::Count),
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
            ..query("email = 'a@b.c'")
        };
        let DynamoRequest::Query(input) = build_query("users", &args).unwrap() else {
            panic!("expected a Query request");
        };
        assert_eq!(input.index_name.as_deref(), Some("by_email"));
        assert_eq!(input.consistent_read, Some(true));
        assert_eq!(input.scan_index_forward, Some(false));
        assert_eq!(input.limit, Some(10));
        assert_eq!(input.select, Some(Select::Count));
    }

    #[test]
    fn test_should_leave_default_query_flags_unset() {
        let DynamoRequest::Query(input) = build_query("users", &query("pk = 1")).unwrap() else {
            panic!("expected a Query request");
        };
        assert_eq!(input.consistent_read, None);
        assert_eq!(input.scan_index_forward, None);
        assert_eq!(input.filter_expression, None);
        assert_eq!(input.projection_expression, None);
    }

    #[test]
    fn test_should_require_key_condition() {
        let err = build_query("users", &query("  ")).unwrap_err();
        assert!(matches!(err, DynshError::MissingArgument("key condition")));
    }

    #[test]
    fn test_should_fail_query_on_bad_filter() {
        let args = QueryArgs {
            filter: Some("a = 'open".to_owned()),
            ..query("pk = 1")
        };
        let err = build_query("users", &args).unwrap_err();
        assert!(matches!(
            err,
            DynshError::Expression(ExpressionError::Unterminated { .. })
        ));
    }

    #[test]
    fn test_should_build_scan_without_tables_when_unfiltered() {
        let request = build_scan("users", &ScanArgs::default()).unwrap();
        assert_eq!(request.operation(), DynamoDBOperation::Scan);
        let json = request.to_value().unwrap();
        assert_eq!(json, serde_json::json!({ "TableName": "users" }));
    }

    #[test]
    fn test_should_build_parallel_scan() {
        let args = ScanArgs {
            filter: Some("attribute_exists(email)".to_owned()),
            segment: Some(1),
            total_segments: Some(4),
            ..ScanArgs::default()
        };
        let DynamoRequest::Scan(input) = build_scan("users", &args).unwrap() else {
            panic!("expected a Scan request");
        };
        assert_eq!(input.filter_expression.as_deref(), Some("attribute_exists(#0)"));
        assert!(input.expression_attribute_values.is_none());
        assert_eq!(input.segment, Some(1));
        assert_eq!(input.total_segments, Some(4));
    }

    #[test]
    fn test_should_build_get_with_literal_key() {
        let args = GetArgs {
            key: "{pk: 'user#1', sk: 2}".to_owned(),
            projection: Some("name, address.city".to_owned()),
            consistent_read: true,
        };
        let DynamoRequest::GetItem(input) = build_get("users", &args).unwrap() else {
            panic!("expected a GetItem request");
        };
        assert_eq!(input.key["pk"], AttributeValue::S("user#1".to_owned()));
        assert_eq!(input.key["sk"], AttributeValue::N("2".to_owned()));
        assert_eq!(input.projection_expression.as_deref(), Some("#0,#1.#2"));
        assert_eq!(input.expression_attribute_names.unwrap().len(), 3);
        assert_eq!(input.consistent_read, Some(true));
    }

    #[test]
    fn test_should_reject_non_map_key() {
        let args = GetArgs {
            key: "'just a string'".to_owned(),
            ..GetArgs::default()
        };
        let err = build_get("users", &args).unwrap_err();
        assert!(matches!(err, DynshError::InvalidKey { .. }), "{err:?}");
        assert_eq!(
            err.to_string(),
            "invalid key: expected a map literal, found S"
        );
    }

    #[test]
    fn test_should_reject_empty_or_missing_key() {
        let err = parse_key("{}").unwrap_err();
        assert!(matches!(err, DynshError::InvalidKey { .. }), "{err:?}");

        let err = parse_key(" ").unwrap_err();
        assert!(matches!(err, DynshError::MissingArgument("key")), "{err:?}");

        let err = parse_key("{pk: 'a'} trailing").unwrap_err();
        assert!(
            matches!(
                err,
                DynshError::Expression(ExpressionError::UnexpectedToken { .. })
            ),
            "{err:?}"
        );
    }

    #[test]
    fn test_should_build_conditional_put() {
        let args = PutArgs {
            item: "{pk: 'a', tags: <<'x', 'y'>>, n: null}".to_owned(),
            condition: Some("attribute_not_exists(pk)".to_owned()),
            return_values: Some(ReturnValue::AllOld),
        };
        let DynamoRequest::PutItem(input) = build_put("users", &args).unwrap() else {
            panic!("expected a PutItem request");
        };
        assert_eq!(input.item.len(), 3);
        assert_eq!(
            input.item["tags"],
            AttributeValue::Ss(vec!["x".to_owned(), "y".to_owned()])
        );
        assert_eq!(
            input.condition_expression.as_deref(),
            Some("attribute_not_exists(#0)")
        );
        assert!(input.expression_attribute_values.is_none());
        assert_eq!(input.return_values, Some(ReturnValue::AllOld));
    }

    #[test]
    fn test_should_reject_non_map_item() {
        let args = PutArgs {
            item: "[1, 2]".to_owned(),
            ..PutArgs::default()
        };
        let err = build_put("users", &args).unwrap_err();
        assert!(matches!(err, DynshError::InvalidItem { .. }), "{err:?}");
    }

    #[test]
    fn test_should_translate_update_before_condition() {
        let args = UpdateArgs {
            key: "{pk: 'a'}".to_owned(),
            update: "SET visits = visits + 1".to_owned(),
            condition: Some("visits < 100".to_owned()),
            return_values: Some(ReturnValue::UpdatedNew),
        };
        let DynamoRequest::UpdateItem(input) = build_update("users", &args).unwrap() else {
            panic!("expected an UpdateItem request");
        };
        assert_eq!(
            input.update_expression.as_deref(),
            Some("SET #0 = #1 + :0")
        );
        assert_eq!(input.condition_expression.as_deref(), Some("#2 < :1"));
        let values = input.expression_attribute_values.unwrap();
        assert_eq!(values[":0"], AttributeValue::N("1".to_owned()));
        assert_eq!(values[":1"], AttributeValue::N("100".to_owned()));
    }

    #[test]
    fn test_should_require_update_expression() {
        let args = UpdateArgs {
            key: "{pk: 'a'}".to_owned(),
            ..UpdateArgs::default()
        };
        let err = build_update("users", &args).unwrap_err();
        assert!(matches!(err, DynshError::MissingArgument("update expression")));
    }

    #[test]
    fn test_should_build_unconditional_delete() {
        let args = DeleteArgs {
            key: "{pk: 'a', sk: 'b'}".to_owned(),
            ..DeleteArgs::default()
        };
        let request = build_delete("users", &args).unwrap();
        assert_eq!(request.target(), "DynamoDB_20120810.DeleteItem");
        let json = request.to_value().unwrap();
        assert_eq!(json["Key"]["sk"]["S"], "b");
        assert!(json.get("ConditionExpression").is_none());
        assert!(json.get("ExpressionAttributeNames").is_none());
    }

    #[test]
    fn test_should_render_describe_request() {
        let request = build_describe("users");
        assert_eq!(request.target(), "DynamoDB_20120810.DescribeTable");
        assert_eq!(
            request.to_json().unwrap(),
            "{\n  \"TableName\": \"users\"\n}"
        );
    }
}
