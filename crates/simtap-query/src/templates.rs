//! Fixed ADQL templates and the binder that fills them.
//!
//! Values are never spliced in raw: literals are quoted with embedded
//! quotes doubled, and table names must be plain ADQL identifiers.

use simtap_core::error::SimtapError;
use simtap_core::types::Identifier;

pub const DEFAULT_ID_PREFIX: &str = "Gaia DR3 ";

/// Object type, spectral type and stellar parameters for one identifier.
pub const CROSSMATCH: AdqlTemplate = AdqlTemplate::new(
    "SELECT \
        b.main_id, \
        b.otype, \
        b.otype_txt, \
        i.id AS gaia_id, \
        ot.label AS other_type, \
        mesSpT.oidref AS spt_oid, \
        mesSpT.sptype, \
        mesSpT.bibcode AS spt_bibcode, \
        mesFe_H.log_g, \
        mesFe_H.teff, \
        mesFe_H.bibcode AS feh_bibcode, \
        mesFe_H.oidref AS feh_oid \
    FROM basic AS b \
    JOIN ident AS i ON b.oid = i.oidref \
    JOIN otypedef AS ot ON b.otype = ot.otype \
    LEFT JOIN mesSpT USING(oidref) \
    LEFT JOIN mesFe_H USING(oidref) \
    WHERE id = {full_id} \
    ORDER BY id",
);

pub const ID_EXISTS: AdqlTemplate =
    AdqlTemplate::new("SELECT TOP 1 id FROM ident WHERE id = {full_id}");

pub const DESCRIBE_TABLE: AdqlTemplate = AdqlTemplate::new("SELECT TOP 0 * FROM {table}");

pub const LIST_TABLES: AdqlTemplate = AdqlTemplate::new(
    "SELECT * FROM TAP_SCHEMA.tables WHERE schema_name NOT LIKE 'TAP_SCHEMA'",
);

#[derive(Debug, Clone)]
pub enum AdqlParam {
    Literal(String),
    Table(TableName),
}

impl AdqlParam {
    pub fn literal(value: impl Into<String>) -> Self {
        AdqlParam::Literal(value.into())
    }

    fn write_to(&self, out: &mut String) {
        match self {
            AdqlParam::Literal(value) => {
                out.push('\'');
                out.push_str(&value.replace('\'', "''"));
                out.push('\'');
            }
            AdqlParam::Table(name) => out.push_str(name.as_str()),
        }
    }
}

/// Table reference of the form `name` or `schema.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Result<Self, SimtapError> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 || !parts.iter().all(|p| is_regular_identifier(p)) {
            return Err(SimtapError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_regular_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, Copy)]
pub struct AdqlTemplate {
    text: &'static str,
}

impl AdqlTemplate {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Substitutes `{name}` placeholders in one pass; unbound ones are kept.
    pub fn render(&self, params: &[(&str, AdqlParam)]) -> String {
        let mut out = String::with_capacity(self.text.len() + 32);
        let mut rest = self.text;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let name = &after[..end];
            match params.iter().find(|(n, _)| *n == name) {
                Some((_, param)) => param.write_to(&mut out),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }
}

/// Cross-match query for `prefix + identifier`.
pub fn crossmatch_query(identifier: &Identifier, id_prefix: &str) -> String {
    CROSSMATCH.render(&[("full_id", AdqlParam::literal(identifier.with_prefix(id_prefix)))])
}

pub fn id_exists_query(full_id: &str) -> String {
    ID_EXISTS.render(&[("full_id", AdqlParam::literal(full_id))])
}

pub fn describe_table_query(table: &str) -> Result<String, SimtapError> {
    let table = TableName::parse(table)?;
    Ok(DESCRIBE_TABLE.render(&[("table", AdqlParam::Table(table))]))
}

pub fn list_tables_query() -> String {
    LIST_TABLES.render(&[])
}
