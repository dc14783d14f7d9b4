use calcsuite_core::db::{open_db, open_db_in_memory};
use calcsuite_core::{
    AngleMode, BinaryOp, CalculatorEngine, ConversionEngine, MemoryStore, SciFunction,
    SqliteStateStore, StateStore,
};

const CALCULATOR_KEY: &str = "calculator-data";
const CONVERTER_KEY: &str = "converter_history";

/// Pushes one `square(2)` history entry.
fn push_entry(calc: &mut CalculatorEngine<&MemoryStore>) {
    calc.clear_entry();
    calc.input_digit(2);
    calc.apply_function(SciFunction::Square)
        .expect("square is total");
}

#[test]
fn history_is_capped_at_one_hundred_entries_newest_first() {
    let store = MemoryStore::new();
    let mut calc = CalculatorEngine::new(&store);

    for _ in 0..101 {
        push_entry(&mut calc);
    }

    assert_eq!(calc.history().len(), 100);
    // Newest first; the very first entry (id 1) was evicted.
    assert_eq!(calc.history()[0].id, 101);
    assert_eq!(calc.history()[99].id, 2);
    assert!(calc
        .history()
        .windows(2)
        .all(|pair| pair[0].id > pair[1].id));
}

#[test]
fn persisted_blob_carries_at_most_fifty_entries() {
    let store = MemoryStore::new();
    let mut calc = CalculatorEngine::new(&store);
    for _ in 0..60 {
        push_entry(&mut calc);
    }

    let raw = store
        .load(CALCULATOR_KEY)
        .expect("memory store cannot fail")
        .expect("blob must exist after mutations");
    let blob: serde_json::Value = serde_json::from_str(&raw).expect("blob must be valid JSON");
    let persisted = blob["history"].as_array().expect("history must be an array");
    assert_eq!(persisted.len(), 50);
    assert_eq!(persisted[0]["id"], 60);
}

#[test]
fn delete_and_recall_history_entries_by_id() {
    let store = MemoryStore::new();
    let mut calc = CalculatorEngine::new(&store);
    push_entry(&mut calc);
    push_entry(&mut calc);
    assert_eq!(calc.history().len(), 2);

    let kept_id = calc.history()[0].id;
    let dropped_id = calc.history()[1].id;
    calc.delete_history_entry(dropped_id);
    assert_eq!(calc.history().len(), 1);
    assert_eq!(calc.history()[0].id, kept_id);

    // Unknown ids are ignored.
    calc.delete_history_entry(9999);
    assert_eq!(calc.history().len(), 1);

    assert!(calc.recall_history_entry(kept_id));
    assert_eq!(calc.current_input(), "4");
    assert!(!calc.recall_history_entry(dropped_id));

    calc.clear_history();
    assert!(calc.history().is_empty());
}

#[test]
fn calculator_state_survives_rehydration() {
    let store = MemoryStore::new();
    {
        let mut calc = CalculatorEngine::new(&store);
        calc.input_digit(4);
        calc.input_digit(2);
        calc.memory_store();
        calc.toggle_angle_mode();
        calc.input_operator(BinaryOp::Add).unwrap();
        calc.input_digit(3);
        calc.calculate().unwrap();
    }

    let mut reloaded = CalculatorEngine::new(&store);
    assert_eq!(reloaded.memory(), 42.0);
    assert_eq!(reloaded.angle_mode(), AngleMode::Rad);
    assert_eq!(reloaded.history().len(), 1);
    assert_eq!(reloaded.history()[0].expression, "42 + 3");
    assert_eq!(reloaded.history()[0].result, 45.0);

    // Ids keep increasing after a restart.
    let old_max = reloaded.history()[0].id;
    push_entry(&mut reloaded);
    assert_eq!(reloaded.history()[0].id, old_max + 1);
}

#[test]
fn corrupt_calculator_blob_resets_to_defaults() {
    let store = MemoryStore::new();
    store
        .save(CALCULATOR_KEY, "definitely-not-json")
        .expect("memory store cannot fail");

    let calc = CalculatorEngine::new(&store);
    assert_eq!(calc.memory(), 0.0);
    assert_eq!(calc.angle_mode(), AngleMode::Deg);
    assert!(calc.history().is_empty());
}

#[test]
fn converter_history_survives_rehydration_and_caps_at_fifty() {
    let store = MemoryStore::new();
    {
        let mut converter = ConversionEngine::new(&store);
        for i in 1..=55 {
            converter
                .record(i as f64, "meter", "foot", "length")
                .expect("valid conversion must record");
        }
        assert_eq!(converter.history().len(), 50);
        assert_eq!(converter.history()[0].id, 55);
    }

    let mut reloaded = ConversionEngine::new(&store);
    assert_eq!(reloaded.history().len(), 50);
    assert_eq!(reloaded.history()[0].id, 55);
    assert_eq!(reloaded.history()[0].input_value, 55.0);

    reloaded
        .record(2.0, "celsius", "fahrenheit", "temperature")
        .expect("valid conversion must record");
    assert_eq!(reloaded.history()[0].id, 56);
    assert_eq!(reloaded.history().len(), 50);
}

#[test]
fn corrupt_converter_blob_resets_to_empty_history() {
    let store = MemoryStore::new();
    store
        .save(CONVERTER_KEY, "{")
        .expect("memory store cannot fail");

    let converter = ConversionEngine::new(&store);
    assert!(converter.history().is_empty());
}

#[test]
fn engines_share_one_store_without_clobbering_each_other() {
    let store = MemoryStore::new();
    let mut calc = CalculatorEngine::new(&store);
    let mut converter = ConversionEngine::new(&store);

    calc.input_digit(7);
    calc.memory_store();
    converter.record(1.0, "inch", "centimeter", "length").unwrap();

    let reloaded_calc = CalculatorEngine::new(&store);
    let reloaded_converter = ConversionEngine::new(&store);
    assert_eq!(reloaded_calc.memory(), 7.0);
    assert_eq!(reloaded_converter.history().len(), 1);
}

#[test]
fn sqlite_store_roundtrips_blobs() {
    let conn = open_db_in_memory().expect("in-memory db must open");
    let store = SqliteStateStore::new(&conn);

    assert_eq!(store.load("missing").unwrap(), None);
    store.save("slot", "first").unwrap();
    assert_eq!(store.load("slot").unwrap().as_deref(), Some("first"));
    store.save("slot", "second").unwrap();
    assert_eq!(store.load("slot").unwrap().as_deref(), Some("second"));
}

#[test]
fn calculator_persists_through_sqlite() {
    let conn = open_db_in_memory().expect("in-memory db must open");
    {
        let mut calc = CalculatorEngine::new(SqliteStateStore::new(&conn));
        calc.input_digit(9);
        calc.memory_store();
    }

    let reloaded = CalculatorEngine::new(SqliteStateStore::new(&conn));
    assert_eq!(reloaded.memory(), 9.0);
}

#[test]
fn sqlite_file_store_survives_reconnection() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let path = dir.path().join("calcsuite.sqlite3");

    {
        let conn = open_db(&path).expect("file db must open");
        let store = SqliteStateStore::new(&conn);
        store.save("slot", "durable").unwrap();
    }

    let conn = open_db(&path).expect("file db must reopen");
    let store = SqliteStateStore::new(&conn);
    assert_eq!(store.load("slot").unwrap().as_deref(), Some("durable"));
}
