//! Single-item request building: get, put, update and delete.

#[cfg(test)]
mod tests {
    use dynsh_core::request::{
        DeleteArgs, GetArgs, PutArgs, UpdateArgs, build_delete, build_get, build_put,
        build_update,
    };
    use dynsh_model::ReturnValue;
    use serde_json::json;

    use crate::{TABLE, body};

    #[test]
    fn test_should_build_get_item() {
        let args = GetArgs {
            key: "{pk: 'user#1', sk: 42}".to_owned(),
            projection: Some("name, `size`".to_owned()),
            consistent_read: false,
        };
        let request = build_get(TABLE, &args).unwrap();
        assert_eq!(request.target(), "DynamoDB_20120810.GetItem");
        assert_eq!(
            body(&request),
            json!({
                "TableName": "users",
                "Key": { "pk": { "S": "user#1" }, "sk": { "N": "42" } },
                "ProjectionExpression": "#0,#1",
                "ExpressionAttributeNames": { "#0": "name", "#1": "size" }
            })
        );
    }

    #[test]
    fn test_should_build_put_item_with_every_literal_form() {
        let args = PutArgs {
            item: r"{
                pk: 'user#1',
                quote: 'It\'s here',
                count: 10.50,
                active: TRUE,
                gone: null,
                tags: <<'a', 'b'>>,
                scores: << 1 , 2.5 >>,
                history: ['x', 1, ['nested']],
                address: {city: 'Oslo', zip: '0150'}
            }"
            .replace('\n', " "),
            condition: Some("attribute_not_exists(pk)".to_owned()),
            return_values: Some(ReturnValue::AllOld),
        };
        let body = body(&build_put(TABLE, &args).unwrap());

        assert_eq!(
            body["Item"],
            json!({
                "pk": { "S": "user#1" },
                "quote": { "S": "It's here" },
                "count": { "N": "10.50" },
                "active": { "BOOL": true },
                "gone": { "NULL": true },
                "tags": { "SS": ["a", "b"] },
                "scores": { "NS": ["1", "2.5"] },
                "history": { "L": [{ "S": "x" }, { "N": "1" }, { "L": [{ "S": "nested" }] }] },
                "address": { "M": { "city": { "S": "Oslo" }, "zip": { "S": "0150" } } }
            })
        );
        assert_eq!(body["ConditionExpression"], "attribute_not_exists(#0)");
        assert_eq!(body["ExpressionAttributeNames"], json!({ "#0": "pk" }));
        assert!(body.get("ExpressionAttributeValues").is_none());
        assert_eq!(body["ReturnValues"], "ALL_OLD");
    }

    #[test]
    fn test_should_build_update_item() {
        let args = UpdateArgs {
            key: "{pk: 'user#1'}".to_owned(),
            update: "SET visits = if_not_exists(visits, 0) + 1, tags = list_append(tags, ['new']) REMOVE legacy"
                .to_owned(),
            condition: Some("attribute_exists(pk) AND visits < 1000".to_owned()),
            return_values: Some(ReturnValue::UpdatedNew),
        };
        let request = build_update(TABLE, &args).unwrap();
        assert_eq!(request.target(), "DynamoDB_20120810.UpdateItem");
        let body = body(&request);

        assert_eq!(
            body["UpdateExpression"],
            "SET #0 = if_not_exists(#1, :0) + :1, #2 = list_append(#3, :2) REMOVE #4"
        );
        assert_eq!(
            body["ConditionExpression"],
            "attribute_exists(#5) AND #6 < :3"
        );
        assert_eq!(body["ExpressionAttributeValues"][":2"], json!({ "L": [{ "S": "new" }] }));
        assert_eq!(body["ExpressionAttributeValues"][":3"], json!({ "N": "1000" }));
        assert_eq!(body["ReturnValues"], "UPDATED_NEW");
    }

    #[test]
    fn test_should_build_delete_item() {
        let args = DeleteArgs {
            key: "{pk: 'user#1', sk: 'profile'}".to_owned(),
            condition: Some("version = 3".to_owned()),
            return_values: None,
        };
        let body = body(&build_delete(TABLE, &args).unwrap());

        assert_eq!(
            body,
            json!({
                "TableName": "users",
                "Key": { "pk": { "S": "user#1" }, "sk": { "S": "profile" } },
                "ConditionExpression": "#0 = :0",
                "ExpressionAttributeNames": { "#0": "version" },
                "ExpressionAttributeValues": { ":0": { "N": "3" } }
            })
        );
    }
}
