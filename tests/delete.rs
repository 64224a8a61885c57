mod resource {
    pub mod executor;
    pub mod user;
}

#[cfg(test)]
mod tests {
    use crate::resource::{
        executor::RecordingExecutor,
        user::{Order, User},
    };
    use cask::{CaskError, Delete, Predicate, Statement, Table, Value};
    use uuid::Uuid;

    #[test]
    fn delete_if_exists() {
        let delete = Delete::table(User::table_def())
            .filter([User::id.eq(42).unwrap()])
            .unwrap()
            .if_exists();
        let (query, parameters) = delete.build_query().unwrap();
        assert_eq!(query, "DELETE FROM app.users WHERE id = ? IF EXISTS");
        assert_eq!(parameters, [Value::BigInt(Some(42))]);
    }

    #[test]
    fn delete_all_rows() {
        let delete = Delete::table(Order::table_def());
        assert_eq!(delete.to_string(), r#"DELETE FROM app."order""#);
        assert!(delete.predicates().is_empty());
    }

    #[test]
    fn delete_clustering_range() {
        let id = Uuid::new_v4();
        let (query, parameters) = Delete::table(Order::table_def())
            .filter([Order::user_id.eq(3).unwrap()])
            .unwrap()
            .filter([Order::order_id.eq(id).unwrap()])
            .unwrap()
            .build_query()
            .unwrap();
        assert_eq!(
            query,
            r#"DELETE FROM app."order" WHERE user_id = ? AND order_id = ?"#
        );
        assert_eq!(
            parameters,
            [Value::BigInt(Some(3)), Value::Uuid(Some(id))]
        );
    }

    #[test]
    fn delete_filter_is_checked() {
        let error = Delete::table(User::table_def())
            .filter(Vec::<Predicate>::new())
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
        let error = Delete::table(Order::table_def())
            .filter([User::id.eq(1).unwrap()])
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
    }

    #[tokio::test]
    async fn execute_delete() {
        let mut executor = RecordingExecutor::default();
        let delete = Delete::table(User::table_def())
            .filter([User::id.eq(42).unwrap()])
            .unwrap();
        assert_eq!(delete.execute(&mut executor).await.unwrap(), 1);
        assert_eq!(delete.execute(&mut executor).await.unwrap(), 2);
        assert_eq!(executor.statements[0], executor.statements[1]);
    }

    #[test]
    fn views_cannot_be_deleted_from() {
        let view = User::table_def().get_view("by_country").unwrap();
        let error = Delete::table(&view)
            .filter([User::country.eq("IT").unwrap()])
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
        let error = Delete::table(&view).build_query().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CaskError>(),
            Some(CaskError::Validation {
                clause: "DELETE",
                ..
            })
        ));
    }
}
