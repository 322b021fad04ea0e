use super::format::scope_label;
use crate::config::ResolvedConfig;
use crate::session::Session;

const TEXT_PREVIEW: usize = 5;

pub(super) fn print_text_summary(session: &Session, config: &ResolvedConfig) {
    let locale = config.config.locale;
    let summary = session.catalog().summary();
    let matches = session.matches();

    println!("catalog: {} seeds", summary.seed_count);
    println!("classified: {} seeds", summary.classified_seed_count);
    println!("ground_truth: {}", session.source());
    println!(
        "matches: {} ({})",
        matches.len(),
        scope_label(matches.scope())
    );

    let preview = matches
        .seeds()
        .iter()
        .take(TEXT_PREVIEW)
        .map(|seed| {
            format!(
                "{} {}/{}",
                seed.padded_number(),
                locale.nightlord_label(seed.nightlord.into()),
                locale.map_label(seed.map_type)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "preview: {}",
        if preview.is_empty() { "none" } else { &preview }
    );
    println!();
    println!("inspect needs a terminal; use `seedscope match` for scripted queries");
}
