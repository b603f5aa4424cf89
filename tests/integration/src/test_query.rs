//! Query request building, from typed arguments to the wire body.

#[cfg(test)]
mod tests {
    use dynsh_core::request::{QueryArgs, build_query};
    use dynsh_model::{ReturnConsumedCapacity, Select};
    use serde_json::json;

    use crate::{TABLE, body};

    fn query(key_condition: &str) -> QueryArgs {
        QueryArgs {
            key_condition: key_condition.to_owned(),
            ..QueryArgs::default()
        }
    }

    #[test]
    fn test_should_build_key_only_query() {
        let request = build_query(TABLE, &query("pk = 'someStr' AND sk>=123")).unwrap();
        assert_eq!(request.target(), "DynamoDB_20120810.Query");
        assert_eq!(
            body(&request),
            json!({
                "TableName": "users",
                "KeyConditionExpression": "#0 = :0 AND #1>=:1",
                "ExpressionAttributeNames": { "#0": "pk", "#1": "sk" },
                "ExpressionAttributeValues": {
                    ":0": { "S": "someStr" },
                    ":1": { "N": "123" }
                }
            })
        );
    }

    #[test]
    fn test_should_number_key_filter_and_projection_in_order() {
        let args = QueryArgs {
            filter: Some("field0 = 'aValue' AND field1 = 'anotherValue'".to_owned()),
            projection: Some("pk,aValue".to_owned()),
            ..query("pk = 'someStr'")
        };
        let body = body(&build_query(TABLE, &args).unwrap());

        assert_eq!(body["KeyConditionExpression"], "#0 = :0");
        assert_eq!(body["FilterExpression"], "#1 = :1 AND #2 = :2");
        assert_eq!(body["ProjectionExpression"], "#3,#4");
        assert_eq!(
            body["ExpressionAttributeNames"],
            json!({
                "#0": "pk",
                "#1": "field0",
                "#2": "field1",
                "#3": "pk",
                "#4": "aValue"
            })
        );
        assert_eq!(
            body["ExpressionAttributeValues"],
            json!({
                ":0": { "S": "someStr" },
                ":1": { "S": "aValue" },
                ":2": { "S": "anotherValue" }
            })
        );
    }

    #[test]
    fn test_should_keep_placeholder_tables_in_allocation_order() {
        let args = QueryArgs {
            filter: Some("a = 1 AND b = 2 AND c = 3 AND d = 4 AND e = 5".to_owned()),
            projection: Some("f, g, h, i, j".to_owned()),
            ..query("pk = 0")
        };
        let request = build_query(TABLE, &args).unwrap();
        let json = request.to_json().unwrap();

        let positions: Vec<usize> = (0..=10)
            .map(|i| json.find(&format!("\"#{i}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_should_translate_nested_collections_in_filter() {
        let args = QueryArgs {
            filter: Some(
                "info.tags = <<'a','b'>> AND info.scores[1] > 10 AND meta = {kind: 'x', n: [1, true, null]}"
                    .to_owned(),
            ),
            ..query("pk = 'p'")
        };
        let body = body(&build_query(TABLE, &args).unwrap());

        assert_eq!(
            body["FilterExpression"],
            "#1.#2 = :1 AND #3.#4[1] > :2 AND #5 = :3"
        );
        assert_eq!(body["ExpressionAttributeValues"][":1"], json!({ "SS": ["a", "b"] }));
        assert_eq!(body["ExpressionAttributeValues"][":2"], json!({ "N": "10" }));
        assert_eq!(
            body["ExpressionAttributeValues"][":3"],
            json!({
                "M": {
                    "kind": { "S": "x" },
                    "n": { "L": [{ "N": "1" }, { "BOOL": true }, { "NULL": true }] }
                }
            })
        );
    }

    #[test]
    fn test_should_render_query_options() {
        let args = QueryArgs {
            index: Some("by_email".to_owned()),
            consistent_read: true,
            select: Some(Select::AllProjectedAttributes),
            limit: Some(25),
            reverse: true,
            return_consumed_capacity: Some(ReturnConsumedCapacity::Indexes),
            ..query("email = 'a@example.com'")
        };
        let body = body(&build_query(TABLE, &args).unwrap());

        assert_eq!(body["IndexName"], "by_email");
        assert_eq!(body["ConsistentRead"], true);
        assert_eq!(body["Select"], "ALL_PROJECTED_ATTRIBUTES");
        assert_eq!(body["Limit"], 25);
        assert_eq!(body["ScanIndexForward"], false);
        assert_eq!(body["ReturnConsumedCapacity"], "INDEXES");
    }
}
