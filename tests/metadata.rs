mod resource {
    pub mod executor;
    pub mod user;
}

#[cfg(test)]
mod tests {
    use crate::resource::{
        executor::{RecordingExecutor, init_logs},
        user::{ArchivedUser, Order, User},
    };
    use cask::{
        CaskError, ColumnType, Config, Environment, MetaData, PrimaryKeyType, Table, TableDef,
    };
    use indoc::indoc;

    #[test]
    fn schema_statements() {
        let mut metadata = MetaData::new(Config::new(Environment::Prod));
        metadata.register::<User>().register::<Order>().register::<User>();
        assert_eq!(metadata.tables().len(), 2);
        let statements = metadata.statements().unwrap();
        assert_eq!(
            statements,
            [
                "CREATE KEYSPACE IF NOT EXISTS app WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 3}",
                indoc! {"
                    CREATE TABLE IF NOT EXISTS app.users (
                    id bigint,
                    email ascii,
                    name text,
                    country text,
                    age int,
                    score double,
                    active boolean,
                    signup timestamp,
                    last_ip inet,
                    PRIMARY KEY (id)
                    )
                "}
                .trim(),
                indoc! {r#"
                    CREATE TABLE IF NOT EXISTS app."order" (
                    user_id bigint,
                    order_id uuid,
                    amount decimal,
                    note text,
                    PRIMARY KEY (user_id, order_id)
                    )
                "#}
                .trim(),
                indoc! {"
                    CREATE MATERIALIZED VIEW IF NOT EXISTS app.users_by_country AS
                    SELECT * FROM app.users
                    WHERE country IS NOT NULL AND signup IS NOT NULL AND id IS NOT NULL
                    PRIMARY KEY (country, signup, id)
                "}
                .trim(),
                indoc! {"
                    CREATE MATERIALIZED VIEW IF NOT EXISTS app.users_by_email AS
                    SELECT * FROM app.users
                    WHERE email IS NOT NULL AND id IS NOT NULL
                    PRIMARY KEY (email, id)
                "}
                .trim(),
            ]
        );
    }

    #[test]
    fn keyspaces_are_created_once() {
        let mut metadata = MetaData::new(Config::new(Environment::Staging));
        metadata
            .register::<Order>()
            .register::<ArchivedUser>()
            .register::<User>();
        let statements = metadata.statements().unwrap();
        let keyspaces = statements
            .iter()
            .filter(|v| v.starts_with("CREATE KEYSPACE"))
            .collect::<Vec<_>>();
        assert_eq!(
            keyspaces,
            [
                "CREATE KEYSPACE IF NOT EXISTS app WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 2}",
                "CREATE KEYSPACE IF NOT EXISTS archive WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 2}",
            ]
        );
        assert_eq!(statements.len(), 2 + 3 + 2);
    }

    #[test]
    fn composite_partition_key() {
        let table = TableDef::new("metrics", "samples")
            .column("day", ColumnType::Date, PrimaryKeyType::PartitionKey)
            .unwrap()
            .column("bucket", ColumnType::SmallInt, PrimaryKeyType::PartitionKey)
            .unwrap()
            .column("at", ColumnType::Timestamp, PrimaryKeyType::ClusteringKey)
            .unwrap()
            .column("value", ColumnType::Double, PrimaryKeyType::None)
            .unwrap()
            .view("by_value", ["value"])
            .unwrap();
        let mut metadata = MetaData::new(Config::default().with_replication_factor(5));
        metadata.register_def(&table);
        let statements = metadata.statements().unwrap();
        assert_eq!(
            statements[0],
            "CREATE KEYSPACE IF NOT EXISTS metrics WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 5}"
        );
        assert_eq!(
            statements[1],
            indoc! {"
                CREATE TABLE IF NOT EXISTS metrics.samples (
                day date,
                bucket smallint,
                at timestamp,
                value double,
                PRIMARY KEY ((day, bucket), at)
                )
            "}
            .trim()
        );
        assert_eq!(
            statements[2],
            indoc! {"
                CREATE MATERIALIZED VIEW IF NOT EXISTS metrics.samples_by_value AS
                SELECT * FROM metrics.samples
                WHERE value IS NOT NULL AND day IS NOT NULL AND bucket IS NOT NULL AND at IS NOT NULL
                PRIMARY KEY (value, day, bucket, at)
            "}
            .trim()
        );
    }

    #[test]
    fn table_without_partition_key() {
        let table = TableDef::new("app", "logs")
            .column("line", ColumnType::Text, PrimaryKeyType::ClusteringKey)
            .unwrap();
        let mut metadata = MetaData::default();
        metadata.register_def(&table);
        let error = metadata.statements().unwrap_err();
        assert!(error.downcast_ref::<CaskError>().unwrap().is_validation());
    }

    #[test]
    fn views_cannot_be_registered() {
        let mut metadata = MetaData::default();
        metadata.register_def(&User::get_view("by_email").unwrap());
        assert!(metadata.statements().is_err());
    }

    #[tokio::test]
    async fn create_all() {
        init_logs();
        let mut executor = RecordingExecutor::default();
        let mut metadata = MetaData::new(Config::new(Environment::Dev));
        metadata.register::<User>();
        metadata.create_all(&mut executor).await.unwrap();
        assert_eq!(executor.statements.len(), 4);
        assert!(executor.statements[0].0.ends_with("'replication_factor': 1}"));
        assert!(executor.statements.iter().all(|(_, p)| p.is_empty()));
    }

    #[tokio::test]
    async fn create_all_stops_at_the_first_error() {
        let mut executor = RecordingExecutor {
            fail_with: Some("unavailable".into()),
            ..Default::default()
        };
        let mut metadata = MetaData::default();
        metadata.register::<User>();
        let error = metadata.create_all(&mut executor).await.unwrap_err();
        assert_eq!(error.to_string(), "unavailable");
        assert_eq!(executor.statements.len(), 1);
    }
}
