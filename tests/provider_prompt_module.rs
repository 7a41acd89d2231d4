use sonicseq::album::AlbumDraft;
use sonicseq::provider::{build_sequencing_prompt, sequence_result_schema};
use sonicseq::tracks::TrackList;

#[test]
fn provider_prompt_module_lists_album_fields_and_tracks_in_list_order() {
    let draft = AlbumDraft {
        artist: String::new(),
        title: "Endless Summer".to_string(),
        genre: String::new(),
    };
    let album = draft.finalize(TrackList::from_titles(["Sundown", "Drive", ""]).to_vec());

    let prompt = build_sequencing_prompt(&album);

    assert!(prompt.starts_with("Act as a world-class music producer"));
    assert!(prompt.contains("Artist: Unknown Artist\n"));
    assert!(prompt.contains("Title: Endless Summer\n"));
    assert!(prompt.contains("Genre: Unspecified\n"));
    assert!(prompt.contains("Unordered Tracks:\n- Sundown\n- Drive\n- \n"));
    assert!(prompt.contains("strong opener"));
}

#[test]
fn provider_prompt_module_schema_marks_transition_note_optional() {
    let schema = sequence_result_schema();
    let item = &schema["properties"]["sequencedTracks"]["items"];

    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(item["properties"]["trackNumber"]["type"], "NUMBER");
    let required = item["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(|value| value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(required, vec!["trackNumber", "title", "reasoning"]);
    assert!(item["properties"].get("transitionNote").is_some());
}
