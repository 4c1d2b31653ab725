//! Type mapping from documented type text to the type IR
//!
//! The documentation uses a small Java-flavored grammar: scalar keywords,
//! `object`, `List[T]`, `Set[T]`, `Map[K,V]` and bare class names.

use crate::naming::class_name;
use lolgen_common::{ClassId, GeneratorConfig, GeneratorError, Result, ScalarKind, TypeIr};
use std::collections::HashMap;

/// Maps documented type text to [`TypeIr`]
///
/// Class names are looked up in a finished class table, so every class of
/// every resource must be registered before the first lookup.
pub struct TypeMapper<'a> {
    config: &'a GeneratorConfig,
    classes: &'a HashMap<String, ClassId>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(config: &'a GeneratorConfig, classes: &'a HashMap<String, ClassId>) -> Self {
        TypeMapper { config, classes }
    }

    /// Map type text declared in `resource` to a resolved type
    pub fn map_type(&self, resource: &str, text: &str) -> Result<TypeIr> {
        let text = text.trim();
        let unknown = || GeneratorError::UnknownType {
            resource: resource.to_string(),
            text: text.to_string(),
        };

        if let Some(kind) = ScalarKind::from_keyword(text) {
            return Ok(kind.to_type());
        }
        if text == "object" {
            return Ok(TypeIr::DynamicMap);
        }

        if let Some(inner) = Self::generic_args(text, "List").or_else(|| Self::generic_args(text, "Set")) {
            return Ok(TypeIr::sequence(self.map_type(resource, inner)?));
        }

        if let Some(inner) = Self::generic_args(text, "Map") {
            let (key, elem) = split_map_args(inner).ok_or_else(unknown)?;
            return Ok(TypeIr::mapping(
                self.map_type(resource, key)?,
                self.map_type(resource, elem)?,
            ));
        }

        if text.is_empty() || text.contains(['[', ']', ',']) {
            return Err(unknown());
        }

        let name = class_name(self.config, resource, text);
        match self.classes.get(&name) {
            Some(id) => Ok(TypeIr::pointer(TypeIr::Reference(*id))),
            None => Err(unknown()),
        }
    }

    /// Text between `<container>[` and the closing `]`
    fn generic_args<'t>(text: &'t str, container: &str) -> Option<&'t str> {
        text.strip_prefix(container)?
            .strip_prefix('[')?
            .strip_suffix(']')
    }
}

/// Split `K,V` at the first comma outside of brackets
///
/// # Examples
/// ```
/// use lolgen_parser::split_map_args;
///
/// assert_eq!(split_map_args("string,long"), Some(("string", "long")));
/// assert_eq!(
///     split_map_args("string, Map[string,int]"),
///     Some(("string", " Map[string,int]"))
/// );
/// assert_eq!(split_map_args("string"), None);
/// ```
pub fn split_map_args(inner: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => return Some((&inner[..i], &inner[i + 1..])),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> HashMap<String, ClassId> {
        HashMap::from([
            ("Summoner".to_string(), ClassId(0)),
            ("RankTeam".to_string(), ClassId(1)),
        ])
    }

    #[test]
    fn test_map_scalar_types() {
        let config = GeneratorConfig::default();
        let classes = classes();
        let mapper = TypeMapper::new(&config, &classes);

        assert_eq!(mapper.map_type("game", "boolean").unwrap(), TypeIr::Bool);
        assert_eq!(mapper.map_type("game", "int").unwrap(), TypeIr::Int32);
        assert_eq!(mapper.map_type("game", " long ").unwrap(), TypeIr::Int64);
        assert_eq!(mapper.map_type("game", "float").unwrap(), TypeIr::Float32);
        assert_eq!(mapper.map_type("game", "double").unwrap(), TypeIr::Float64);
        assert_eq!(mapper.map_type("game", "string").unwrap(), TypeIr::String);
        assert_eq!(mapper.map_type("game", "object").unwrap(), TypeIr::DynamicMap);
    }

    #[test]
    fn test_map_collections() {
        let config = GeneratorConfig::default();
        let classes = classes();
        let mapper = TypeMapper::new(&config, &classes);

        assert_eq!(
            mapper.map_type("game", "List[int]").unwrap(),
            TypeIr::sequence(TypeIr::Int32)
        );
        assert_eq!(
            mapper.map_type("game", "Set[long]").unwrap(),
            TypeIr::sequence(TypeIr::Int64)
        );
        assert_eq!(
            mapper.map_type("game", "Map[string,long]").unwrap(),
            TypeIr::mapping(TypeIr::String, TypeIr::Int64)
        );
        assert_eq!(
            mapper
                .map_type("game", "Map[string, Map[string,List[double]]]")
                .unwrap(),
            TypeIr::mapping(
                TypeIr::String,
                TypeIr::mapping(TypeIr::String, TypeIr::sequence(TypeIr::Float64))
            )
        );
    }

    #[test]
    fn test_map_class_references() {
        let config = GeneratorConfig::default();
        let classes = classes();
        let mapper = TypeMapper::new(&config, &classes);

        assert_eq!(
            mapper.map_type("summoner", "SummonerDto").unwrap(),
            TypeIr::pointer(TypeIr::Reference(ClassId(0)))
        );
        // Renamed per resource before lookup
        assert_eq!(
            mapper.map_type("team", "List[TeamDto]").unwrap(),
            TypeIr::sequence(TypeIr::pointer(TypeIr::Reference(ClassId(1))))
        );
        assert_eq!(
            mapper.map_type("summoner", "Map[string,SummonerDto]").unwrap(),
            TypeIr::mapping(TypeIr::String, TypeIr::pointer(TypeIr::Reference(ClassId(0))))
        );
    }

    #[test]
    fn test_unknown_and_malformed() {
        let config = GeneratorConfig::default();
        let classes = classes();
        let mapper = TypeMapper::new(&config, &classes);

        for text in [
            "Map[string,long",
            "Map[string]",
            "List[int",
            "List[]",
            "Tuple[int,int]",
            "TeamDto",
            "",
            "Long",
        ] {
            let err = mapper.map_type("game", text).unwrap_err();
            assert!(
                matches!(err, GeneratorError::UnknownType { .. }),
                "expected UnknownType for {text:?}, got {err:?}"
            );
        }
    }
}
