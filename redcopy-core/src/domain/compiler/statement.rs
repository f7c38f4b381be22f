// redcopy-core/src/domain/compiler/statement.rs

use crate::domain::transfer::credentials::{self, ResolvedCredentials};
use crate::domain::transfer::{DataSourceKind, TransferSpec};

/// A rendered COPY statement.
///
/// The text embeds the secret key, so `Display` and `Debug` only ever show
/// the redacted form. The raw text is reachable through [`LoadStatement::as_sql`]
/// and is meant for the warehouse driver only.
#[derive(Clone, PartialEq, Eq)]
pub struct LoadStatement {
    sql: String,
    redacted: String,
    target: String,
    source_kind: DataSourceKind,
    option_count: usize,
}

impl LoadStatement {
    /// Renders the bulk-load statement for `spec` with `creds`.
    ///
    /// Pure and infallible: the same inputs always give the same bytes, and
    /// malformed input only surfaces once the warehouse parses it.
    ///
    /// # Identifier injection
    ///
    /// `schema` and `table` are interpolated verbatim, without quoting or
    /// escaping. Callers must hand in trusted identifiers. The same holds for
    /// the copy options, which are joined in order with no deduplication or
    /// syntax check; the warehouse decides what is valid.
    pub fn build(spec: &TransferSpec, creds: &ResolvedCredentials) -> Self {
        let sql = render(spec, creds.access_key(), creds.secret_key().expose());
        let redacted = render(spec, creds.access_key(), credentials::redacted());

        Self {
            sql,
            redacted,
            target: spec.target(),
            source_kind: spec.data_source,
            option_count: spec.copy_options.len(),
        }
    }

    pub fn as_sql(&self) -> &str {
        &self.sql
    }

    pub fn redacted(&self) -> &str {
        &self.redacted
    }

    /// `schema.table` being loaded.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn source_kind(&self) -> DataSourceKind {
        self.source_kind
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }
}

fn render(spec: &TransferSpec, access_key: &str, secret_key: &str) -> String {
    format!(
        "COPY {schema}.{table}\n\
         FROM '{data_source}://{location}/{key}'\n\
         with credentials\n\
         'aws_access_key_id={access_key};aws_secret_access_key={secret_key}'\n\
         {copy_options};",
        schema = spec.schema,
        table = spec.table,
        data_source = spec.data_source.as_str(),
        location = spec.source_location.as_deref().unwrap_or_default(),
        key = spec.source_key.as_deref().unwrap_or_default(),
        copy_options = spec.copy_options.join(" "),
    )
}

impl std::fmt::Display for LoadStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted)
    }
}

impl std::fmt::Debug for LoadStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadStatement")
            .field("target", &self.target)
            .field("source_kind", &self.source_kind)
            .field("sql", &self.redacted)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::transfer::Secret;
    use anyhow::Result;

    fn events_spec() -> Result<TransferSpec> {
        Ok(TransferSpec::builder("public", "events")
            .source("my-bucket", "2024/01/events.csv")
            .build()?)
    }

    fn creds() -> ResolvedCredentials {
        ResolvedCredentials::new("AKIA...", Secret::new("SECRET"))
    }

    #[test]
    fn test_reference_statement() -> Result<()> {
        let statement = LoadStatement::build(&events_spec()?, &creds());
        assert_eq!(
            statement.as_sql(),
            "COPY public.events\n\
             FROM 's3://my-bucket/2024/01/events.csv'\n\
             with credentials\n\
             'aws_access_key_id=AKIA...;aws_secret_access_key=SECRET'\n\
             ;"
        );
        Ok(())
    }

    #[test]
    fn test_redacted_form_snapshot() -> Result<()> {
        let spec = TransferSpec::builder("public", "events")
            .source("my-bucket", "2024/01/events.csv")
            .copy_options(["CSV", "IGNOREHEADER 1"])
            .build()?;
        let statement = LoadStatement::build(&spec, &creds());
        insta::assert_snapshot!(statement.redacted(), @r"
        COPY public.events
        FROM 's3://my-bucket/2024/01/events.csv'
        with credentials
        'aws_access_key_id=AKIA...;aws_secret_access_key=***'
        CSV IGNOREHEADER 1;
        ");
        Ok(())
    }

    #[test]
    fn test_build_is_deterministic() -> Result<()> {
        let spec = events_spec()?;
        let first = LoadStatement::build(&spec, &creds());
        let second = LoadStatement::build(&spec, &creds());
        assert_eq!(first.as_sql().as_bytes(), second.as_sql().as_bytes());
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_options_keep_order_and_duplicates() -> Result<()> {
        let spec = TransferSpec::builder("public", "events")
            .source("b", "k")
            .copy_options(["GZIP", "CSV", "GZIP", "NOT_A_REAL_OPTION"])
            .build()?;
        let statement = LoadStatement::build(&spec, &creds());
        assert!(statement.as_sql().ends_with("GZIP CSV GZIP NOT_A_REAL_OPTION;"));
        assert_eq!(statement.option_count(), 4);
        Ok(())
    }

    #[test]
    fn test_dynamodb_uses_its_token_and_table() -> Result<()> {
        let spec = TransferSpec::builder("public", "orders")
            .data_source(DataSourceKind::DynamoDb)
            .source_location("orders-table")
            .copy_options(["readratio 50"])
            .build()?;
        let statement = LoadStatement::build(&spec, &creds());
        assert!(statement.as_sql().contains("FROM 'dynamodb://orders-table/'"));
        assert_eq!(statement.source_kind(), DataSourceKind::DynamoDb);
        Ok(())
    }

    #[test]
    fn test_identifiers_are_not_escaped() -> Result<()> {
        let spec = TransferSpec::builder("public", "events; DROP TABLE users")
            .source("b", "k")
            .build()?;
        let statement = LoadStatement::build(&spec, &creds());
        assert!(
            statement
                .as_sql()
                .starts_with("COPY public.events; DROP TABLE users\n")
        );
        Ok(())
    }

    #[test]
    fn test_display_and_debug_never_show_secret() -> Result<()> {
        let statement = LoadStatement::build(&events_spec()?, &creds());
        let shown = format!("{} {:?}", statement, statement);
        assert!(!shown.contains("SECRET"));
        assert!(shown.contains("aws_secret_access_key=***"));
        assert!(shown.contains("aws_access_key_id=AKIA..."));
        Ok(())
    }
}
