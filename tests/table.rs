mod resource {
    pub mod user;
}

#[cfg(test)]
mod tests {
    use crate::resource::user::{Order, User};
    use cask::{
        CacheFieldType, CaskError, Column, ColumnType, PrimaryKeyType, Table, TableDef, TableRef,
    };

    #[test]
    fn derived_table() {
        let table = User::table_def();
        assert_eq!(table.keyspace(), "app");
        assert_eq!(table.name(), "users");
        assert_eq!(table.table_ref(), &TableRef::new("app", "users"));
        assert_eq!(
            table.columns().map(|c| c.name).collect::<Vec<_>>(),
            [
                "id", "email", "name", "country", "age", "score", "active", "signup", "last_ip"
            ]
        );
        assert_eq!(table.partition_key().collect::<Vec<_>>(), [&User::id]);
        assert_eq!(table.clustering_key().count(), 0);
        assert_eq!(User::email.column_type, ColumnType::Ascii);
        assert_eq!(User::signup.column_type, ColumnType::Timestamp);
        assert_eq!(User::last_ip.column_type, ColumnType::Inet);
        assert_eq!(
            User::id,
            Column::new("app", "users", "id", ColumnType::BigInt)
        );
    }

    #[test]
    fn derived_names() {
        let table = Order::table_def();
        assert_eq!(table.name(), "order");
        assert_eq!(Order::_comment.name, "note");
        assert_eq!(Order::order_id.column_type, ColumnType::Uuid);
        assert_eq!(Order::amount.column_type, ColumnType::Decimal);
        let defs = table.column_defs();
        assert_eq!(defs[0].primary_key, PrimaryKeyType::PartitionKey);
        assert_eq!(defs[1].primary_key, PrimaryKeyType::ClusteringKey);
        assert!(!defs[2].is_primary_key());
        assert!(table.views().is_empty());
    }

    #[test]
    fn get_view() {
        let view = User::get_view("by_email").unwrap();
        assert_eq!(view.name(), "users_by_email");
        assert_eq!(view.keyspace(), "app");
        assert!(view.table_ref().is_view());
        assert_eq!(
            view.columns().collect::<Vec<_>>(),
            User::table_def().columns().collect::<Vec<_>>()
        );
        assert!(User::id.belongs_to(view.table_ref()));
        // The original descriptor is untouched
        assert_eq!(User::table_def().name(), "users");
        assert!(!User::table_def().table_ref().is_view());
        assert_eq!(
            User::table_def().views()["by_country"],
            [User::country, User::signup]
        );
    }

    #[test]
    fn missing_view() {
        let error = User::get_view("by_phone").unwrap_err();
        let error = error.downcast_ref::<CaskError>().unwrap();
        assert!(error.is_not_found());
        assert_eq!(
            error.to_string(),
            "Table `app.users` does not have a view associated with `by_phone`"
        );
    }

    #[test]
    fn explicit_table_def() {
        let table = TableDef::new("", "events")
            .column("day", ColumnType::Date, PrimaryKeyType::PartitionKey)
            .unwrap()
            .column("at", ColumnType::Timestamp, PrimaryKeyType::ClusteringKey)
            .unwrap()
            .column("Payload", ColumnType::Blob, PrimaryKeyType::None)
            .unwrap();
        assert_eq!(table.table_ref().full_name(), "events");
        assert_eq!(table.find_column("at").unwrap().table, "events");
        assert!(table.find_column("missing").is_none());

        let error = table.clone().view("by_payload", ["payload"]).unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
        let error = table.clone().view("empty", Vec::new()).unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
        let table = table.view("by_payload", ["Payload"]).unwrap();
        assert_eq!(
            table.get_view("by_payload").unwrap().name(),
            "events_by_payload"
        );
    }

    #[test]
    fn aliases() {
        let column = User::name.alias("user_name").unwrap();
        assert_eq!(column.alias, Some("user_name"));
        assert_eq!(column.name, "name");
        assert!(User::name.alias("user name").is_err());
        assert!(User::name.alias("1st").is_err());
        assert!(User::id.count().alias("").is_err());
    }

    #[test]
    fn cache_schema() {
        let schema = User::table_def().cache_schema();
        assert_eq!(schema[&CacheFieldType::Text], ["email", "name", "country"]);
        assert_eq!(
            schema[&CacheFieldType::Numeric],
            ["id", "age", "score", "signup"]
        );
        assert_eq!(schema[&CacheFieldType::Tag], ["active", "last_ip"]);
        assert_eq!(
            schema.keys().map(ToString::to_string).collect::<Vec<_>>(),
            ["TEXT", "NUMERIC", "TAG"]
        );
    }

    #[test]
    fn columns_are_declared_once() {
        let table = TableDef::new("app", "events")
            .column("id", ColumnType::BigInt, PrimaryKeyType::PartitionKey)
            .unwrap();
        let error = table
            .clone()
            .column("id", ColumnType::Text, PrimaryKeyType::None)
            .unwrap_err();
        let error = error.downcast_ref::<CaskError>().unwrap();
        assert!(error.is_validation());
        assert!(error.to_string().contains("`id`"), "{error}");
        assert_eq!(table.columns().count(), 1);
    }
}
