use serde_json::{json, Value};

/// Response schema in the provider's OpenAPI-subset dialect.
pub fn sequence_result_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sequencedTracks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "trackNumber": {
                            "type": "NUMBER",
                            "description": "The new track number (1-based index)"
                        },
                        "title": {
                            "type": "STRING",
                            "description": "The title of the track"
                        },
                        "reasoning": {
                            "type": "STRING",
                            "description": "Why this track is placed here (e.g., 'Sets the tone', 'High energy peak', 'Soft closer')"
                        },
                        "transitionNote": {
                            "type": "STRING",
                            "description": "How this track transitions into the next one (or closes the album)"
                        }
                    },
                    "required": ["trackNumber", "title", "reasoning"]
                }
            },
            "albumAnalysis": {
                "type": "STRING",
                "description": "A short paragraph describing the overall vibe and flow of the new sequence."
            },
            "narrativeArc": {
                "type": "STRING",
                "description": "A poetic description of the journey the listener takes."
            }
        },
        "required": ["sequencedTracks", "albumAnalysis", "narrativeArc"]
    })
}
