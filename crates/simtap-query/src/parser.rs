use anyhow::Result;
use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Parses ADQL text. ADQL is close enough to generic SQL (`TOP n`,
/// `JOIN ... USING`, quoted literals) for the generic dialect to accept it.
pub fn parse_adql(adql: &str) -> Result<Vec<Statement>> {
    let dialect = GenericDialect {};
    let statements = Parser::parse_sql(&dialect, adql)?;
    Ok(statements)
}

/// Accepts exactly one read-only statement.
pub fn validate_query(adql: &str) -> Result<Statement> {
    let mut statements = parse_adql(adql)?;
    if statements.len() != 1 {
        anyhow::bail!("expected a single statement, found {}", statements.len());
    }
    let stmt = statements.remove(0);
    if !matches!(stmt, Statement::Query(_)) {
        anyhow::bail!("only SELECT queries can be sent to the catalogue");
    }
    Ok(stmt)
}
