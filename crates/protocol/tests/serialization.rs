use sc_protocol::*;
use serde_json::json;

#[test]
fn test_client_config_deserialization_from_toml() {
    let toml_str = r#"
backend_url = "https://builder.example.com"
request_timeout_secs = 90

[stages]
coder = 8000
"#;

    let config: ClientConfig = toml::from_str(toml_str).expect("Failed to deserialize ClientConfig");

    assert_eq!(config.backend_url, "https://builder.example.com");
    assert_eq!(config.request_timeout_secs, Some(90));
    assert_eq!(config.stages.coder, 8000);
    // Unspecified stages keep their defaults
    assert_eq!(config.stages.thinker, 3000);
    assert_eq!(config.stages.deployer, 3000);
}

#[test]
fn test_empty_client_config_uses_defaults() {
    let config: ClientConfig = toml::from_str("").expect("Failed to deserialize empty config");
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
}

#[test]
fn test_settings_use_fixed_api_key_name() {
    let settings = Settings {
        api_key: Some("k1".to_string()),
        locale: Locale::En,
    };

    let toml_str = toml::to_string(&settings).expect("Failed to serialize Settings");
    assert!(toml_str.contains(&format!("{API_KEY_SETTING} = \"k1\"")));
    assert!(toml_str.contains("locale = \"en\""));

    let deserialized: Settings = toml::from_str(&toml_str).expect("Failed to deserialize Settings");
    assert_eq!(deserialized, settings);
}

#[test]
fn test_settings_default_locale_is_arabic() {
    let settings: Settings = toml::from_str("").expect("Failed to deserialize empty settings");
    assert_eq!(settings.locale, Locale::Ar);
    assert_eq!(settings.api_key_or_empty(), "");
}

#[test]
fn test_stage_status_serialization() {
    let json = serde_json::to_value(StageStatus::Working).expect("Failed to serialize StageStatus");
    assert_eq!(json, "WORKING");

    let json = serde_json::to_value(StageId::Deployer).expect("Failed to serialize StageId");
    assert_eq!(json, "deployer");
}

#[test]
fn test_pipeline_run_never_serializes_api_key() {
    let run = PipelineRun {
        id: uuid::Uuid::new_v4(),
        generation: 3,
        idea: "portfolio site".to_string(),
        api_key: "secret-key".to_string(),
        status: RunStatus::Running,
        statuses: StageId::ALL
            .into_iter()
            .map(|stage| (stage, StageStatus::Waiting))
            .collect(),
        completed: Vec::new(),
        artifacts: Artifacts::default(),
        progress: 0,
        error: None,
        is_active: true,
        started_at: Some(chrono::Utc::now()),
        finished_at: None,
    };

    let json = serde_json::to_string(&run).expect("Failed to serialize PipelineRun");
    assert!(!json.contains("secret-key"));

    let deserialized: PipelineRun = serde_json::from_str(&json).expect("Failed to deserialize PipelineRun");
    assert_eq!(deserialized.api_key, "");
    assert_eq!(deserialized.status_of(StageId::Coder), StageStatus::Waiting);
    assert_eq!(deserialized.generation, 3);
}

#[test]
fn test_stage_requests_use_backend_field_names() {
    let request = PrepareDeploymentRequest {
        files: vec![GeneratedFile::new("index.html", "<h1>hi</h1>")],
        test_results: json!({"performance_score": 85}),
        api_key: "k1".to_string(),
    };

    let json = serde_json::to_value(&request).expect("Failed to serialize request");
    assert_eq!(json["api_key"], "k1");
    assert_eq!(json["files"][0]["name"], "index.html");
    assert_eq!(json["test_results"]["performance_score"], 85);
    // Absent file_type is omitted rather than sent as null
    assert!(json["files"][0].get("file_type").is_none());
}

#[test]
fn test_deployment_response_tolerates_null_preview() {
    let body = json!({
        "deployment_info": {"deployment_summary": "ready"},
        "download_url": "/api/download-website",
        "preview_url": null
    });

    let response: PrepareDeploymentResponse =
        serde_json::from_value(body).expect("Failed to deserialize deployment response");
    assert_eq!(response.preview_url, None);
    assert_eq!(response.download_url.as_deref(), Some("/api/download-website"));
}

#[test]
fn test_terminal_entry_wire_shape() {
    let entry = TerminalEntry::Command("npm start".to_string());
    let json = serde_json::to_value(&entry).expect("Failed to serialize TerminalEntry");
    assert_eq!(json, json!({"type": "command", "text": "npm start"}));

    let error: TerminalEntry = serde_json::from_value(json!({"type": "error", "text": "boom"}))
        .expect("Failed to deserialize TerminalEntry");
    assert_eq!(error, TerminalEntry::Error("boom".to_string()));
}

#[test]
fn test_op_enum_serialization() {
    let op = Op::StartBuild {
        idea: "portfolio site".to_string(),
    };

    let json = serde_json::to_value(&op).expect("Failed to serialize Op");
    assert_eq!(json["type"], "startBuild");
    assert_eq!(json["payload"]["idea"], "portfolio site");

    let deserialized: Op = serde_json::from_value(json).expect("Failed to deserialize Op");
    match deserialized {
        Op::StartBuild { idea } => assert_eq!(idea, "portfolio site"),
        _ => panic!("Wrong variant"),
    }

    let json = serde_json::to_value(Op::Reset).expect("Failed to serialize Op::Reset");
    assert_eq!(json["type"], "reset");
}

#[test]
fn test_event_enum_serialization() {
    let run_id = uuid::Uuid::new_v4();

    let event = Event::StageStatusUpdate {
        run_id,
        stage: StageId::Coder,
        status: StageStatus::Working,
    };
    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "stageStatusUpdate");
    assert_eq!(json["payload"]["stage"], "coder");
    assert_eq!(json["payload"]["status"], "WORKING");

    let artifact = Event::ArtifactReady {
        run_id,
        artifact: Artifact::Files(vec![GeneratedFile::new("style.css", "body {}")]),
    };
    let json = serde_json::to_value(&artifact).expect("Failed to serialize Event");
    assert_eq!(json["type"], "artifactReady");
    assert_eq!(json["payload"]["artifact"]["kind"], "files");
    assert_eq!(json["payload"]["artifact"]["value"][0]["name"], "style.css");
}
