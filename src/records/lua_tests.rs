// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for LUA validation.

#[cfg(test)]
mod tests {
    use crate::config::ValidatorConfig;
    use crate::record::RecordInput;
    use crate::records::lua::*;
    use crate::records::test_support::{first_error, has_warning, run};
    use crate::registry::Registry;

    fn lua(content: &str) -> RecordInput {
        RecordInput::new("LUA", "www.example.com", content)
            .with_priority(0)
            .with_ttl(300)
    }

    #[test]
    fn test_common_forms_are_valid() {
        for content in [
            "A \"pickclosest({'192.0.2.1','198.51.100.1'})\"",
            "ifportup(443, {'192.0.2.1', '198.51.100.1'})",
            "CNAME \"country('DE') and 'de.example.net' or 'www.example.net'\"",
        ] {
            let result = run(&LuaValidator, &lua(content));
            assert!(result.is_valid(), "{content}: {result:?}");
            assert!(result.warnings().is_empty(), "{content}: {:?}", result.warnings());
        }
    }

    #[test]
    fn test_explicit_mode() {
        let content = ";if(continent('EU')) then return '192.0.2.1' else return '198.51.100.1' end";
        assert_eq!(check_lua_content(content).unwrap(), LuaMode::Explicit);

        let result = run(&LuaValidator, &lua(content));
        assert_eq!(result.data().unwrap().content, content);
        assert!(has_warning(&result, "explicit return mode"));

        let result = run(&LuaValidator, &lua(";os.execute('rm -rf /')"));
        assert!(first_error(&result).contains("must contain at least one \"return\""));
    }

    #[test]
    fn test_function_definition() {
        let result = run(&LuaValidator, &lua("function pick() return '192.0.2.1' end"));
        assert!(result.is_valid(), "{result:?}");
        assert!(has_warning(&result, "common PowerDNS Lua functions"));
    }

    #[test]
    fn test_unbalanced_brackets() {
        let result = run(&LuaValidator, &lua("A \"pickclosest({'192.0.2.1'\""));
        assert_eq!(
            first_error(&result),
            "LUA record has mismatched parentheses. Check your syntax."
        );

        let result = run(&LuaValidator, &lua("pickclosest({'192.0.2.1'})}"));
        assert_eq!(
            first_error(&result),
            "LUA record has mismatched braces. Check your syntax."
        );
    }

    #[test]
    fn test_implicit_mode_needs_a_call() {
        for content in ["192.0.2.1", "return '192.0.2.1'", "io.open('x')"] {
            let result = run(&LuaValidator, &lua(content));
            assert!(
                first_error(&result).contains("implicit return mode"),
                "{content}: {result:?}"
            );
        }
    }

    #[test]
    fn test_system_access_rejected() {
        for content in [
            ";return os.time()",
            "dofile('/etc/passwd')",
            "A \"ifportup(443, {io.read()})\"",
            "loadfile('x')()",
        ] {
            let result = run(&LuaValidator, &lua(content));
            assert!(
                first_error(&result).contains("dangerous system access"),
                "{content}: {result:?}"
            );
        }
    }

    #[test]
    fn test_unbalanced_quotes_warn() {
        let result = run(&LuaValidator, &lua("ifportup(443, {\"192.0.2.1})"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "unbalanced quotes"));
    }

    #[test]
    fn test_empty_and_unprintable_content() {
        assert_eq!(
            first_error(&run(&LuaValidator, &lua("   "))),
            "LUA record content cannot be empty."
        );
        assert_eq!(
            first_error(&run(&LuaValidator, &lua("view({'\u{7}'})"))),
            "Invalid characters in LUA record content."
        );
    }

    #[test]
    fn test_priority_and_name() {
        let record = lua("ifportup(443, {'192.0.2.1'})").with_priority(10);
        assert!(first_error(&run(&LuaValidator, &record)).contains("priority"));

        let record = RecordInput::new("LUA", "bad..name.example.com", "ifportup(443, {'192.0.2.1'})");
        assert!(!run(&LuaValidator, &record).is_valid());
    }

    #[test]
    fn test_registry_dispatches_lua() {
        let registry = Registry::new(ValidatorConfig::default());
        let result = registry.validate(
            &RecordInput::new("lua", "www", "A \"pickclosest({'192.0.2.1'\"")
                .with_zone_name("example.com"),
        );
        assert!(!result.is_valid());

        let result = registry.validate(
            &RecordInput::new("LUA", "www", "A \"pickclosest({'192.0.2.1'})\"")
                .with_zone_name("example.com"),
        );
        assert_eq!(result.data().unwrap().name, "www.example.com");
    }
}
