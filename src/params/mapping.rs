//! Turns a raw field map into validated call arguments.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::{PlotError, PlotResult};
use crate::params::schema::{Dest, FieldSpec, FieldType, Schema};
use crate::params::value::{Fields, Value};
use crate::rscript::{Command, Literal, NamedArgs, Number};

/// Validated arguments for one call, plus every processed field value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgSet {
    positional: Vec<Option<Literal>>,
    named: NamedArgs,
    values: IndexMap<&'static str, Literal>,
}

impl ArgSet {
    /// Processed value of a schema field, after coercion and collapsing.
    pub fn value(&self, field: &str) -> Option<&Literal> {
        self.values.get(field)
    }

    pub fn set_positional(&mut self, index: usize, value: Literal) {
        if self.positional.len() <= index {
            self.positional.resize(index + 1, None);
        }
        self.positional[index] = Some(value);
    }

    pub fn set_named(&mut self, key: impl Into<String>, value: Literal) {
        self.named.insert(key.into(), Some(value));
    }

    pub fn named(&self) -> &NamedArgs {
        &self.named
    }

    /// Finish the call. Every positional slot up to the last one used must be filled.
    pub fn into_command(self, name: impl Into<String>) -> PlotResult<Command> {
        let name = name.into();
        let positional = self
            .positional
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| {
                    PlotError::type_err(format!("{}: positional argument {} was never set", name, i))
                })
            })
            .collect::<PlotResult<Vec<_>>>()?;
        Ok(Command {
            name,
            positional,
            named: self.named,
        })
    }

    fn route(&mut self, spec: &FieldSpec, value: Literal) {
        match spec.dest {
            Dest::Position(index) => self.set_positional(index, value.clone()),
            Dest::Key(key) if !value.is_null() => self.set_named(key, value.clone()),
            Dest::Key(_) | Dest::Unrouted => {}
        }
        self.values.insert(spec.name, value);
    }
}

/// Validate `input` against `schema`, field by field in schema order.
///
/// Fields not declared by the schema are ignored.
pub fn map_fields(schema: &Schema, input: &Fields) -> PlotResult<ArgSet> {
    let mut args = ArgSet::default();
    for spec in schema.fields() {
        let raw = input.get(spec.name);
        let present = raw.is_some() || spec.required || matches!(spec.dest, Dest::Position(_));
        let value = if present {
            let raw = raw.ok_or_else(|| PlotError::validation(spec.name, "is required"))?;
            process(spec, raw)?
        } else if let Some(default) = spec.default {
            Some(
                spec.ty
                    .coerce(&Value::sym(default))
                    .map_err(|e| e.into_validation(spec.name))?,
            )
        } else {
            None
        };
        if let Some(value) = value {
            args.route(spec, value);
        }
    }
    Ok(args)
}

fn process(spec: &FieldSpec, raw: &Value) -> PlotResult<Option<Literal>> {
    if spec.array_type {
        if let Value::Object(obj) = raw {
            if obj.type_name() == spec.ty.name() {
                return Ok(Some(Literal::Object(obj.clone())));
            }
        }
    }

    let items = normalize(spec.ty, raw);
    if spec.array_type {
        let whole = Value::List(items.into_owned());
        return spec
            .ty
            .coerce(&whole)
            .map(Some)
            .map_err(|e| e.into_validation(spec.name));
    }

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let lit = if spec.auto_cast {
            spec.ty.coerce(item)
        } else {
            spec.ty.check(item)
        };
        let lit = lit.map_err(|e| {
            if items.len() == 1 {
                e.into_validation(spec.name)
            } else {
                e.into_validation(format!("{}[{}]", spec.name, i))
            }
        })?;
        out.push(lit);
    }

    Ok(match out.len() {
        0 => None,
        1 => out.pop(),
        _ => Some(Literal::Seq(out)),
    })
}

/// Scalars become one-element lists. A numeric triple bound for a color field
/// is one color, not three.
fn normalize(ty: FieldType, raw: &Value) -> Cow<'_, [Value]> {
    match raw {
        Value::List(items)
            if ty == FieldType::Color
                && items.len() == 3
                && items.first().and_then(Value::as_number).is_some() =>
        {
            Cow::Owned(vec![raw.clone()])
        }
        Value::List(items) => Cow::Borrowed(items.as_slice()),
        other => Cow::Owned(vec![other.clone()]),
    }
}

/// Read a two-number `[a, b]` list.
pub fn numeric_pair(value: &Value, field: &str) -> PlotResult<(Number, Number)> {
    let numbers = match value {
        Value::List(_) => value.to_numbers(field)?,
        other => {
            return Err(PlotError::validation(
                field,
                format!("expected a [x, y] pair, got {}", other.type_name()),
            ))
        }
    };
    match numbers.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(PlotError::validation(
            field,
            format!("expected 2 values, got {}", numbers.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn schema() -> Schema {
        Schema::new("f").with(&[
            FieldSpec::pos("x", 0, FieldType::Numeric),
            FieldSpec::key("color", "col", FieldType::Color).auto(),
            FieldSpec::key("label", "labels", FieldType::Text),
            FieldSpec::key("pch", "pch", FieldType::PointType).auto().default("none"),
            FieldSpec::unrouted("size", FieldType::OutputSize).auto().array(),
            FieldSpec::unrouted("title", FieldType::Text),
        ])
    }

    fn render(input: &Fields) -> PlotResult<String> {
        map_fields(&schema(), input)?.into_command("f").map(|c| c.to_r())
    }

    #[test]
    fn test_scalar_collapse_and_default() {
        let out = render(&fields! { "x" => vec![3] }).unwrap();
        assert_eq!(out, "f(3, pch='.')");
    }

    #[test]
    fn test_positional_slot_is_mandatory() {
        let err = render(&fields! { "color" => Value::sym("red") }).unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "x"));
    }

    #[test]
    fn test_rgb_triple_is_one_color() {
        let out = render(&fields! { "x" => 1, "color" => vec![0.2, 0.2, 1.0] }).unwrap();
        assert_eq!(out, "f(1, col=rgb(0.2, 0.2, 1.0), pch='.')");
    }

    #[test]
    fn test_list_of_colors_is_coerced_elementwise() {
        let colors = Value::from(vec![Value::sym("red"), Value::from(vec![0.1, 0.2, 0.3])]);
        let out = render(&fields! { "x" => 1, "color" => colors }).unwrap();
        assert_eq!(out, "f(1, col=c('red', rgb(0.1, 0.2, 0.3)), pch='.')");
    }

    #[test]
    fn test_empty_list_means_absent() {
        let out = render(&fields! { "x" => 1, "label" => Vec::<Value>::new() }).unwrap();
        assert_eq!(out, "f(1, pch='.')");
    }

    #[test]
    fn test_strict_field_rejects_wrong_type() {
        let err = render(&fields! { "x" => vec![Value::Int(1), Value::from("a")] }).unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "x[1]"));
    }

    #[test]
    fn test_array_type_validates_the_whole_list() {
        let args = map_fields(&schema(), &fields! { "x" => 1, "size" => vec![800, 600] }).unwrap();
        assert_eq!(args.value("size").unwrap().to_r(), "c(800, 600)");
        assert!(map_fields(&schema(), &fields! { "x" => 1, "size" => vec![800] }).is_err());
    }

    #[test]
    fn test_unrouted_values_are_kept() {
        let args = map_fields(&schema(), &fields! { "x" => 1, "title" => "Hi" }).unwrap();
        assert_eq!(args.value("title"), Some(&Literal::text("Hi")));
        assert_eq!(args.into_command("f").unwrap().to_r(), "f(1, pch='.')");
    }

    #[test]
    fn test_undeclared_fields_are_ignored() {
        let out = render(&fields! { "x" => 1, "whatever" => Value::Null, "other" => 3 }).unwrap();
        assert_eq!(out, "f(1, pch='.')");
    }

    #[test]
    fn test_required_field() {
        let schema = Schema::new("g").with(&[FieldSpec::unrouted("t", FieldType::Text).required()]);
        assert!(map_fields(&schema, &Fields::new()).is_err());
    }

    #[test]
    fn test_hole_in_positionals_is_a_type_error() {
        let mut args = ArgSet::default();
        args.set_positional(2, Literal::text("a"));
        assert!(matches!(args.into_command("text"), Err(PlotError::Type(_))));
    }

    #[test]
    fn test_numeric_pair() {
        let (a, b) = numeric_pair(&Value::from(vec![1, 2]), "p").unwrap();
        assert_eq!((a, b), (Number::Int(1), Number::Int(2)));
        assert!(numeric_pair(&Value::from(vec![1, 2, 3]), "p").is_err());
        assert!(numeric_pair(&Value::Int(1), "p").is_err());
    }
}
