//! Scan and DescribeTable request building.

#[cfg(test)]
mod tests {
    use dynsh_core::request::{ScanArgs, build_describe, build_scan};
    use serde_json::json;

    use crate::{TABLE, body};

    #[test]
    fn test_should_build_bare_scan() {
        let request = build_scan(TABLE, &ScanArgs::default()).unwrap();
        assert_eq!(request.target(), "DynamoDB_20120810.Scan");
        assert_eq!(body(&request), json!({ "TableName": "users" }));
    }

    #[test]
    fn test_should_build_filtered_parallel_scan() {
        let args = ScanArgs {
            filter: Some(
                "begins_with(field0, 'someStr0') OR attribute_exists(field1) OR attribute_type(field3, 'S')"
                    .to_owned(),
            ),
            projection: Some("field0, field1".to_owned()),
            segment: Some(2),
            total_segments: Some(8),
            ..ScanArgs::default()
        };
        let body = body(&build_scan(TABLE, &args).unwrap());

        assert_eq!(
            body["FilterExpression"],
            "begins_with(#0, :0) OR attribute_exists(#1) OR attribute_type(#2, :1)"
        );
        assert_eq!(body["ProjectionExpression"], "#3,#4");
        assert_eq!(
            body["ExpressionAttributeValues"],
            json!({ ":0": { "S": "someStr0" }, ":1": { "S": "S" } })
        );
        assert_eq!(body["Segment"], 2);
        assert_eq!(body["TotalSegments"], 8);
    }

    #[test]
    fn test_should_send_names_without_values_for_projection_only_scan() {
        let args = ScanArgs {
            projection: Some("a.b[0].c, d.e, f.g[0]".to_owned()),
            ..ScanArgs::default()
        };
        let body = body(&build_scan(TABLE, &args).unwrap());

        assert_eq!(body["ProjectionExpression"], "#0.#1[0].#2,#3.#4,#5.#6[0]");
        assert_eq!(body["ExpressionAttributeNames"].as_object().unwrap().len(), 7);
        assert!(body.get("ExpressionAttributeValues").is_none());
        assert!(body.get("FilterExpression").is_none());
    }

    #[test]
    fn test_should_treat_blank_filter_as_absent() {
        let args = ScanArgs {
            filter: Some("   ".to_owned()),
            projection: Some(String::new()),
            ..ScanArgs::default()
        };
        let body = body(&build_scan(TABLE, &args).unwrap());
        assert_eq!(body, json!({ "TableName": "users" }));
    }

    #[test]
    fn test_should_build_describe_table() {
        let request = build_describe(TABLE);
        assert_eq!(request.target(), "DynamoDB_20120810.DescribeTable");
        assert_eq!(body(&request), json!({ "TableName": "users" }));
    }
}
