use std::error::Error as _;

use grammar_forge_core::{Grammar, GrammarElement as E, GrammarError};
use grammar_forge_plugins::{
    OptionsById, PipelineConfig, PluginError, PluginKind, PluginOptions, PluginRegistry,
};
use grammar_forge_sdl::{rules, sdl_grammar};

fn document() -> Grammar {
    Grammar::builder("Document")
        .rule("Document", E::list(E::non_terminal("Definition")))
        .rule("Definition", E::terminal("Name"))
        .build()
}

#[test]
fn add_description_wraps_document() {
    let registry = PluginRegistry::with_builtins();
    let input = document().to_json_string().unwrap();
    let parsed = registry.parse(&input, "json", None).unwrap();
    assert_eq!(parsed.format.as_deref(), Some("json"));

    let mut options = OptionsById::new();
    options.insert(
        "add-description".into(),
        PluginOptions::new().with("ruleNames", serde_json::json!(["Document"])),
    );
    let result = registry
        .transform(&parsed.grammar, &["add-description"], &options)
        .unwrap();
    let json = result.grammar.to_json_value().unwrap();
    let definition = &json["rules"]["Document"]["definition"];
    assert_eq!(definition["kind"], "Sequence");
    assert_eq!(definition["elements"][0]["kind"], "Optional");
    assert_eq!(definition["elements"][0]["element"]["name"], "Description");
    assert_eq!(definition["elements"][1]["kind"], "List");

    assert_eq!(
        result.grammar.definition("Definition").unwrap(),
        document().definition("Definition").unwrap()
    );
    assert_eq!(
        result.grammar.definition("Description").unwrap(),
        &E::terminal("StringValue")
    );
}

#[test]
fn toml_pipeline_renders_schema_text() {
    let config = PipelineConfig::from_toml_str(
        r#"
parser = "json"
transformers = ["normalize", "simplify", "validate"]
generator = "graphql-sdl"

[options.validate]
failOnError = true

[generator_options]
pretty = false
includeDescriptions = false
"#,
    )
    .unwrap();

    let input = sdl_grammar().to_json_string().unwrap();
    let output = PluginRegistry::with_builtins().run(&config, &input).unwrap();

    assert_eq!(output.transformed.applied, ["normalize", "simplify", "validate"]);
    assert_eq!(output.generated.generator, "graphql-sdl");
    assert_eq!(output.generated.format.as_deref(), Some("graphql"));
    let text = output.generated.output.into_text();
    assert!(!text.contains('\n'), "{text}");
    assert!(text.contains("type Query {"), "{text}");
}

#[test]
fn add_field_from_config_lands_in_rendered_type() {
    let config = PipelineConfig::from_toml_str(
        r#"
transformers = ["add-field"]

[options.add-field]
ruleName = "ObjectTypeDefinition"
fieldName = "tags"
fieldType = "[String!]!"
"#,
    )
    .unwrap();

    let mut grammar = sdl_grammar();
    grammar.root = rules::OBJECT_TYPE_DEFINITION.to_string();
    let input = grammar.to_json_string().unwrap();

    let output = PluginRegistry::with_builtins().run(&config, &input).unwrap();
    let text = output.generated.output.into_text();
    assert!(text.contains("{\n  tags: [String!]!\n}"), "{text}");
}

#[test]
fn invalid_add_field_options_are_rejected_before_running() {
    let registry = PluginRegistry::with_builtins();
    let mut options = OptionsById::new();
    options.insert(
        "add-field".into(),
        PluginOptions::new()
            .with("ruleName", "ObjectTypeDefinition")
            .with("fieldName", "tags")
            .with("fieldType", "[String!"),
    );
    let err = registry
        .transform(&sdl_grammar(), &["add-field"], &options)
        .unwrap_err();
    match err {
        PluginError::InvalidOptions { id, kind, errors } => {
            assert_eq!(id, "add-field");
            assert_eq!(kind, PluginKind::Transformer);
            assert_eq!(errors.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_validate_stage_stops_the_pipeline() {
    let registry = PluginRegistry::with_builtins();
    let dangling = Grammar::builder("A")
        .rule("A", E::non_terminal("Missing"))
        .build();
    let mut options = OptionsById::new();
    options.insert(
        "validate".into(),
        PluginOptions::new().with("failOnError", true),
    );

    let err = registry
        .transform(&dangling, &["validate", "normalize"], &options)
        .unwrap_err();
    assert_eq!(err.id(), Some("validate"));
    assert_eq!(err.kind(), Some(PluginKind::Transformer));
    let source = err.source().unwrap();
    assert!(matches!(
        source.downcast_ref::<GrammarError>(),
        Some(GrammarError::ValidationFailed(_))
    ));
}

#[test]
fn sdl_parser_is_unsupported() {
    let registry = PluginRegistry::with_builtins();
    let config = PipelineConfig {
        parser: "graphql-sdl".into(),
        ..PipelineConfig::default()
    };
    let err = registry.run(&config, "type Query { id: ID }").unwrap_err();
    assert!(matches!(err, PluginError::ParsingFailed { .. }));
    assert!(err.to_string().contains("not supported"));
}

#[test]
fn disabled_generator_is_not_found() {
    let mut registry = PluginRegistry::with_builtins();
    registry
        .set_plugin_enabled("graphql-sdl", PluginKind::Generator, false)
        .unwrap();
    let err = registry
        .run(
            &PipelineConfig::default(),
            &document().to_json_string().unwrap(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PluginError::NotFound {
            kind: PluginKind::Generator,
            ..
        }
    ));
    // The parser of the same id is unaffected.
    assert!(registry.get_parser("graphql-sdl").is_some());
}

#[test]
fn config_file_drives_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.toml");
    std::fs::write(
        &path,
        "transformers = [\"add-description\"]\ngenerator = \"rust-types\"\n",
    )
    .unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    let output = PluginRegistry::with_builtins()
        .run(&config, &document().to_json_string().unwrap())
        .unwrap();
    let text = output.generated.output.into_text();
    assert!(text.contains("pub struct Document;"));
    assert!(text.contains("pub struct Description;"));
    assert_eq!(output.generated.format.as_deref(), Some("rust"));
}
