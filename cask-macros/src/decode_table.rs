use crate::decode_column::{ColumnMetadata, decode_column};
use cask_core::matches_path;
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{
    Error, Expr, ExprLit, ExprPath, ItemStruct, Lit, LitStr, Result, parse::ParseBuffer,
    spanned::Spanned,
};

pub(crate) struct TableMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) keyspace: String,
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnMetadata>,
    /// View key and the indexes of its columns.
    pub(crate) views: Vec<(String, Vec<usize>)>,
}

/// Resolve a view column list: `"column_name"`, `field` or a tuple of those.
fn decode_view_columns(item: &ItemStruct, columns: &[ColumnMetadata], col: &Expr) -> Result<Vec<usize>> {
    Ok(match col {
        Expr::Lit(ExprLit {
            lit: Lit::Str(v), ..
        }) => {
            let Some(i) = columns.iter().position(|c| c.name == v.value()) else {
                return Err(Error::new(
                    v.span(),
                    format!("Column `{}` does not exist in the table", v.value()),
                ));
            };
            vec![i]
        }
        Expr::Path(ExprPath { path, .. }) => {
            let Some(i) = columns.iter().position(|c| {
                let c = c.ident.to_string();
                matches_path(path, &["Self", &c]) || matches_path(path, &[&item.ident.to_string(), &c])
            }) else {
                return Err(Error::new(
                    path.span(),
                    format!(
                        "Field `{}` does not exist in the struct",
                        path.to_token_stream()
                    ),
                ));
            };
            vec![i]
        }
        Expr::Paren(paren) => decode_view_columns(item, columns, &paren.expr)?,
        Expr::Tuple(tuple) => {
            let mut result = Vec::new();
            for v in &tuple.elems {
                let v = decode_view_columns(item, columns, v)?;
                if v.len() != 1 {
                    return Err(Error::new(
                        tuple.span(),
                        "View columns inside a tuple must be either a column name or a field",
                    ));
                }
                result.extend(v);
            }
            result
        }
        _ => {
            return Err(Error::new(
                col.span(),
                "Expected a column name, a field or a tuple of those",
            ));
        }
    })
}

pub fn decode_table(item: ItemStruct) -> TableMetadata {
    let columns: Vec<_> = item.fields.iter().map(decode_column).collect();
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.name == column.name) {
            panic!(
                "Column `{}` is declared twice in `{}`, rename one with `#[cask(name = \"..\")]`",
                column.name, item.ident
            );
        }
    }
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut keyspace = String::new();
    let mut views = Vec::new();
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("cask") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `cask`, use it like: `#[cask(attribute = value, ..)]`",);
            };
            let result = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[cask(name = \"my_table\")]`"
                        );
                    };
                    name = value.value();
                } else if arg.path.is_ident("keyspace") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `keyspace`, use it like: `#[cask(keyspace = \"my_keyspace\")]`"
                        );
                    };
                    keyspace = value.value();
                } else if arg.path.is_ident("views") {
                    arg.parse_nested_meta(|view| {
                        let Some(key) = view.path.get_ident().map(ToString::to_string) else {
                            return Err(view.error("Expected a view key"));
                        };
                        let expr = view.value()?.parse::<Expr>()?;
                        let indexes = decode_view_columns(&item, &columns, &expr)?;
                        if views.iter().any(|(k, _)| *k == key) {
                            return Err(view.error(format!("View `{key}` is declared twice")));
                        }
                        views.push((key, indexes));
                        Ok(())
                    })?;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside cask macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
            if let Err(e) = result {
                panic!(
                    "{e}, use it like: `#[cask(views(by_email = email, by_name = (name, id)))]`"
                );
            }
        }
    }
    TableMetadata {
        item,
        keyspace,
        name,
        columns,
        views,
    }
}
