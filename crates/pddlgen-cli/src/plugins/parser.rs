//! Builds a clap parser from a manifest's `parser` capability.

use clap::{value_parser, Arg, ArgAction, Command};
use pddlgen_spec::plugin::{ArgumentSpec, ParserSpec};
use pddlgen_spec::{ParamKind, ParamSet, ParamValue};

/// Builds the command that parses a domain's forwarded tokens.
///
/// Arguments without a default become required positionals in declaration
/// order. Arguments with a default become `--long-name` options, and flags
/// become `--long-name` switches.
pub fn build_command(domain: &str, spec: &ParserSpec, description: Option<&str>) -> Command {
    let mut cmd = Command::new(domain.to_string())
        .bin_name(format!("pddl-generators {} [options] --", domain))
        .no_binary_name(true)
        .disable_version_flag(true);

    if let Some(text) = description {
        cmd = cmd.about(text.trim_end().to_string());
    }

    for arg in &spec.arguments {
        cmd = cmd.arg(build_arg(arg));
    }
    cmd
}

fn build_arg(spec: &ArgumentSpec) -> Arg {
    let mut arg = Arg::new(spec.name.clone());
    if let Some(help) = &spec.help {
        arg = arg.help(help.clone());
    }

    arg = match spec.kind {
        ParamKind::Int => arg.value_parser(value_parser!(i64)).allow_negative_numbers(true),
        ParamKind::Float => arg.value_parser(value_parser!(f64)).allow_negative_numbers(true),
        ParamKind::String => arg.value_parser(value_parser!(String)),
        ParamKind::Flag => {
            return arg.long(spec.long_name()).action(ArgAction::SetTrue);
        }
    };

    match spec.default_value() {
        Some(default) => arg.long(spec.long_name()).default_value(default.to_string()),
        None => arg.required(true).value_name(spec.name.clone()),
    }
}

/// Parses forwarded tokens into parameters, in declaration order.
pub fn parse_params(cmd: Command, spec: &ParserSpec, rest: &[String]) -> Result<ParamSet, clap::Error> {
    let matches = cmd.try_get_matches_from(rest)?;

    let mut params = ParamSet::new();
    for arg in &spec.arguments {
        let id = arg.name.as_str();
        let value = match arg.kind {
            ParamKind::Int => matches.get_one::<i64>(id).copied().map(ParamValue::Int),
            ParamKind::Float => matches.get_one::<f64>(id).copied().map(ParamValue::Float),
            ParamKind::String => matches.get_one::<String>(id).cloned().map(ParamValue::Str),
            ParamKind::Flag => Some(ParamValue::Flag(matches.get_flag(id))),
        };
        if let Some(value) = value {
            params.insert(arg.name.clone(), value);
        }
    }
    Ok(params)
}
