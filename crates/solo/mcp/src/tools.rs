//! The Solo Arc tool set.
//!
//! Every tool answers with one text block of pretty-printed JSON. Domain
//! failures (unknown identifiers, out-of-range levels, bad argument types)
//! come back as `isError` results carrying `{ "error": kind, "message": .. }`
//! so the calling model can read and correct them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};
use solo_composer::{
    EnhancementRequest, Enhancer, DEFAULT_FOUNDATION, DEFAULT_INTENSITY_LEVEL, DEFAULT_PHASE,
};
use solo_types::{FoundationId, PhaseId, SoloError, SoloResult};

use crate::adapter::{McpAdapter, McpAdapterConfig, McpToolExecutor};
use crate::error::{McpAdapterError, McpResult};
use crate::protocol::{McpAnnotations, McpTool, McpToolCall, McpToolResult};

/// Which Solo Arc operation a tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoloToolKind {
    GetIntensityProfile,
    ListCatalog,
    EnhancePromptWithJazz,
    ListHarmonicFoundations,
    GetHarmonicFoundationDetails,
    GetPhaseSpecification,
    ComparePhasesIntensity,
    GetMonkPrinciples,
}

impl SoloToolKind {
    pub const ALL: [SoloToolKind; 8] = [
        SoloToolKind::GetIntensityProfile,
        SoloToolKind::ListCatalog,
        SoloToolKind::EnhancePromptWithJazz,
        SoloToolKind::ListHarmonicFoundations,
        SoloToolKind::GetHarmonicFoundationDetails,
        SoloToolKind::GetPhaseSpecification,
        SoloToolKind::ComparePhasesIntensity,
        SoloToolKind::GetMonkPrinciples,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoloToolKind::GetIntensityProfile => "get_intensity_profile",
            SoloToolKind::ListCatalog => "list_catalog",
            SoloToolKind::EnhancePromptWithJazz => "enhance_prompt_with_jazz",
            SoloToolKind::ListHarmonicFoundations => "list_harmonic_foundations",
            SoloToolKind::GetHarmonicFoundationDetails => "get_harmonic_foundation_details",
            SoloToolKind::GetPhaseSpecification => "get_phase_specification",
            SoloToolKind::ComparePhasesIntensity => "compare_phases_intensity",
            SoloToolKind::GetMonkPrinciples => "get_monk_principles",
        }
    }

    fn title(self) -> &'static str {
        match self {
            SoloToolKind::GetIntensityProfile => "Get intensity profile",
            SoloToolKind::ListCatalog => "List catalog",
            SoloToolKind::EnhancePromptWithJazz => "Enhance prompt with jazz",
            SoloToolKind::ListHarmonicFoundations => "List harmonic foundations",
            SoloToolKind::GetHarmonicFoundationDetails => "Harmonic foundation details",
            SoloToolKind::GetPhaseSpecification => "Phase specification",
            SoloToolKind::ComparePhasesIntensity => "Compare phase intensity",
            SoloToolKind::GetMonkPrinciples => "Monk principles",
        }
    }

    fn description(self) -> &'static str {
        match self {
            SoloToolKind::GetIntensityProfile => {
                "Derive the validated intensity profile for a harmonic foundation, solo phase and \
                 intensity level, with a note for every coherence repair."
            }
            SoloToolKind::ListCatalog => {
                "List every harmonic foundation and solo phase in catalog order."
            }
            SoloToolKind::EnhancePromptWithJazz => {
                "Enhance an image generation prompt with jazz improvisation aesthetic: temporal \
                 revelation through an established harmonic grammar, anchored on a Monk composition."
            }
            SoloToolKind::ListHarmonicFoundations => {
                "List the harmonic foundations (Monk compositions) with their complexity class, \
                 key center and characteristic feel."
            }
            SoloToolKind::GetHarmonicFoundationDetails => {
                "Get the complexity class, key center and characteristic of one harmonic foundation."
            }
            SoloToolKind::GetPhaseSpecification => {
                "Get the specification of a solo phase: epistemic role, sensory intention, visual \
                 treatment and Monk principle."
            }
            SoloToolKind::ComparePhasesIntensity => {
                "Compare validated intensity profiles across statement, development and resolution \
                 for one harmonic foundation."
            }
            SoloToolKind::GetMonkPrinciples => {
                "Get the Monk anchor principles: constraint as liberation, silence as structure, \
                 rhythmic displacement, dissonance as truth."
            }
        }
    }

    fn input_schema(self) -> Value {
        let foundation = json!({
            "type": "string",
            "enum": FoundationId::ALL.iter().map(|f| f.name()).collect::<Vec<_>>(),
            "description": "Which Monk composition anchors the aesthetic"
        });
        let phase = json!({
            "type": "string",
            "enum": PhaseId::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "description": "Solo phase: statement (clarity establishing), development (complexity \
                            exploring), resolution (mastery integrating)"
        });
        let level = json!({
            "type": "integer",
            "minimum": 1,
            "maximum": 10,
            "description": "Intensity scale 1-10"
        });

        match self {
            SoloToolKind::GetIntensityProfile => json!({
                "type": "object",
                "properties": {
                    "harmonic_foundation": foundation,
                    "solo_phase": phase,
                    "intensity_level": level
                },
                "required": ["harmonic_foundation", "solo_phase", "intensity_level"]
            }),
            SoloToolKind::EnhancePromptWithJazz => json!({
                "type": "object",
                "properties": {
                    "base_prompt": {
                        "type": "string",
                        "description": "The original image description to enhance"
                    },
                    "harmonic_foundation": foundation,
                    "solo_phase": phase,
                    "intensity_level": level,
                    "monk_emphasis": {
                        "type": "boolean",
                        "description": "Append the phase's Monk visual principle"
                    }
                },
                "required": ["base_prompt"]
            }),
            SoloToolKind::GetHarmonicFoundationDetails => json!({
                "type": "object",
                "properties": { "foundation_name": foundation },
                "required": ["foundation_name"]
            }),
            SoloToolKind::GetPhaseSpecification => json!({
                "type": "object",
                "properties": { "phase_name": phase },
                "required": ["phase_name"]
            }),
            SoloToolKind::ComparePhasesIntensity => json!({
                "type": "object",
                "properties": {
                    "harmonic_foundation": foundation,
                    "intensity_level": level
                }
            }),
            SoloToolKind::ListCatalog
            | SoloToolKind::ListHarmonicFoundations
            | SoloToolKind::GetMonkPrinciples => json!({ "type": "object", "properties": {} }),
        }
    }

    pub fn definition(self) -> McpTool {
        McpTool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            annotations: McpAnnotations::read_only(self.title()),
        }
    }
}

/// Executor for one Solo Arc tool.
pub struct SoloTool {
    kind: SoloToolKind,
    tool: McpTool,
    enhancer: Arc<Enhancer>,
}

impl SoloTool {
    pub fn new(kind: SoloToolKind, enhancer: Arc<Enhancer>) -> Self {
        Self {
            kind,
            tool: kind.definition(),
            enhancer,
        }
    }

    pub fn kind(&self) -> SoloToolKind {
        self.kind
    }

    fn run(&self, args: &Args<'_>) -> McpResult<Value> {
        let engine = self.enhancer.engine();
        match self.kind {
            SoloToolKind::GetIntensityProfile => to_json(engine.get_profile(
                args.required_str("harmonic_foundation")?,
                args.required_str("solo_phase")?,
                args.required_int("intensity_level")?,
            )?),
            SoloToolKind::ListCatalog => to_json(engine.list_catalog()),
            SoloToolKind::EnhancePromptWithJazz => {
                let request = EnhancementRequest {
                    base_prompt: args.required_str("base_prompt")?.to_string(),
                    harmonic_foundation: args
                        .str("harmonic_foundation")?
                        .unwrap_or(DEFAULT_FOUNDATION)
                        .to_string(),
                    solo_phase: args.str("solo_phase")?.unwrap_or(DEFAULT_PHASE).to_string(),
                    intensity_level: args
                        .int("intensity_level")?
                        .unwrap_or(DEFAULT_INTENSITY_LEVEL),
                    monk_emphasis: args.bool("monk_emphasis")?,
                };
                to_json(self.enhancer.enhance(&request)?)
            }
            SoloToolKind::ListHarmonicFoundations => {
                let foundations = engine.registry().list_foundations();
                Ok(json!({
                    "foundations": foundations,
                    "count": foundations.len()
                }))
            }
            SoloToolKind::GetHarmonicFoundationDetails => {
                to_json(engine.foundation_details(args.required_str("foundation_name")?)?)
            }
            SoloToolKind::GetPhaseSpecification => {
                to_json(engine.phase_details(args.required_str("phase_name")?)?)
            }
            SoloToolKind::ComparePhasesIntensity => to_json(engine.compare_phases(
                args.str("harmonic_foundation")?.unwrap_or(DEFAULT_FOUNDATION),
                args.int("intensity_level")?.unwrap_or(DEFAULT_INTENSITY_LEVEL),
            )?),
            SoloToolKind::GetMonkPrinciples => Ok(json!({
                "principles": engine.monk_principles()
            })),
        }
    }
}

#[async_trait]
impl McpToolExecutor for SoloTool {
    async fn execute(&self, call: &McpToolCall) -> McpResult<McpToolResult> {
        let outcome = Args::new(&call.arguments)
            .map_err(McpAdapterError::from)
            .and_then(|args| self.run(&args));

        match outcome {
            Ok(value) => Ok(McpToolResult::text(serde_json::to_string_pretty(&value)?)),
            Err(McpAdapterError::Domain(err)) => domain_error(&err),
            Err(other) => Err(other),
        }
    }

    fn tool(&self) -> &McpTool {
        &self.tool
    }
}

fn to_json<T: Serialize>(value: T) -> McpResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn domain_error(err: &SoloError) -> McpResult<McpToolResult> {
    let body = json!({
        "error": err.kind(),
        "message": err.to_string(),
    });
    Ok(McpToolResult::error_text(serde_json::to_string_pretty(&body)?))
}

/// Typed view over a `tools/call` arguments object.
struct Args<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Args<'a> {
    fn new(arguments: &'a Value) -> SoloResult<Self> {
        match arguments {
            Value::Null => Ok(Self { map: None }),
            Value::Object(map) => Ok(Self { map: Some(map) }),
            _ => Err(SoloError::invalid("tool arguments must be a JSON object")),
        }
    }

    /// Present, non-null value.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map
            .and_then(|m| m.get(name))
            .filter(|v| !v.is_null())
    }

    fn str(&self, name: &str) -> SoloResult<Option<&'a str>> {
        self.get(name)
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| SoloError::invalid(format!("`{name}` must be a string")))
            })
            .transpose()
    }

    fn int(&self, name: &str) -> SoloResult<Option<i64>> {
        self.get(name)
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| SoloError::invalid(format!("`{name}` must be an integer")))
            })
            .transpose()
    }

    fn bool(&self, name: &str) -> SoloResult<Option<bool>> {
        self.get(name)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| SoloError::invalid(format!("`{name}` must be a boolean")))
            })
            .transpose()
    }

    fn required_str(&self, name: &str) -> SoloResult<&'a str> {
        self.str(name)?.ok_or_else(|| missing(name))
    }

    fn required_int(&self, name: &str) -> SoloResult<i64> {
        self.int(name)?.ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> SoloError {
    SoloError::invalid(format!("missing required argument `{name}`"))
}

/// Adapter with every Solo Arc tool registered.
pub fn solo_adapter(enhancer: Arc<Enhancer>, config: McpAdapterConfig) -> McpAdapter {
    let mut adapter = McpAdapter::new().with_config(config);
    for kind in SoloToolKind::ALL {
        adapter.register_tool(Arc::new(SoloTool::new(kind, Arc::clone(&enhancer))));
    }
    adapter
}
