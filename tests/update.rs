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
    use cask::{CaskError, Predicate, Statement, Table, Update, Value};

    #[test]
    fn update_name() {
        let update = Update::table(User::table_def())
            .set(User::name, "Bob")
            .unwrap()
            .filter([User::id.eq(42).unwrap()])
            .unwrap();
        let (query, parameters) = update.build_query().unwrap();
        assert_eq!(query, "UPDATE app.users SET name = ? WHERE id = ?");
        assert_eq!(
            parameters,
            [Value::Text(Some("Bob".into())), Value::BigInt(Some(42))]
        );
        assert_eq!(update.to_string(), query);
    }

    #[test]
    fn repeated_set_keeps_position() {
        let update = Update::table(User::table_def())
            .set(User::name, "Alice")
            .unwrap()
            .set(User::age, 30)
            .unwrap()
            .set(User::name, "Bob")
            .unwrap()
            .set(User::country, None::<String>)
            .unwrap()
            .filter([User::id.eq(1).unwrap()])
            .unwrap()
            .if_exists();
        let (query, parameters) = update.build_query().unwrap();
        assert_eq!(
            query,
            "UPDATE app.users SET name = ?, age = ?, country = ? WHERE id = ? IF EXISTS"
        );
        assert_eq!(
            parameters,
            [
                Value::Text(Some("Bob".into())),
                Value::Int(Some(30)),
                Value::Text(None),
                Value::BigInt(Some(1)),
            ]
        );
        assert_eq!(update.assignments().len(), 3);
    }

    #[test]
    fn update_without_set_fails_at_build() {
        let update = Update::table(User::table_def())
            .filter([User::id.eq(1).unwrap()])
            .unwrap();
        let error = update.build_query().unwrap_err();
        let error = error.downcast_ref::<CaskError>().unwrap();
        assert!(matches!(error, CaskError::Validation { clause: "SET", .. }));
    }

    #[test]
    fn set_is_checked() {
        let error = Update::table(User::table_def())
            .set(Order::amount, rust_decimal::Decimal::ONE)
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());

        let error = Update::table(User::table_def())
            .set(User::age, "thirty")
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_type_mismatch());
    }

    #[tokio::test]
    async fn execute_update() {
        let mut executor = RecordingExecutor::default();
        Update::table(User::table_def())
            .set(User::active, false)
            .unwrap()
            .filter([User::id.is_in([1_i64, 2]).unwrap()])
            .unwrap()
            .execute(&mut executor)
            .await
            .unwrap();
        let (query, parameters) = &executor.statements[0];
        assert_eq!(query, "UPDATE app.users SET active = ? WHERE id IN ?");
        assert_eq!(parameters.len(), 2);
    }

    #[test]
    fn update_filter_needs_predicates() {
        let error = Update::table(User::table_def())
            .set(User::name, "Bob")
            .unwrap()
            .filter(Vec::<Predicate>::new())
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CaskError>(),
            Some(CaskError::Validation {
                clause: "WHERE",
                ..
            })
        ));
    }

    #[test]
    fn views_cannot_be_updated() {
        let view = User::table_def().get_view("by_email").unwrap();
        let error = Update::table(&view)
            .set(User::name, "Bob")
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
        let error = Update::table(&view)
            .filter([User::email.eq("bob@example.com").unwrap()])
            .unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
    }
}
