use vouch_benches::available_corpora;
use vouch_core::query::Engine;

#[test]
fn vouch_benches_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = available_corpora().iter().find(|c| c.name() == "catalog").expect("registered corpus");
    let dataset = corpus.load();

    let engine = Engine::new();
    let (exact, recursive) = dataset.paths(&engine);
    assert_eq!(engine.resolve(&dataset.actual, &exact)?.to_string(), "10");
    engine.search(&dataset.actual, &dataset.search_expected, &recursive)?;

    let report = dataset.compare();
    let rendered = report.render();
    println!("{rendered}");
    assert!(rendered.contains("@ [\"sections\",20,\"products\",3,\"variants\",1,\"color\"]"));
    assert!(rendered.contains("- \"green\"\n+ \"blue\""));
    Ok(())
}
