/// Tidy a raw card name.
///
/// Drops the `Trainer` and `Supporter` labels, collapses whitespace, and
/// turns a trailing lowercase `ex` into the ` EX` rank suffix. `Pokedex`
/// (and `Pokédex`) keep their spelling.
pub fn clean_card_name(raw: &str) -> String {
    let stripped = raw.replace("Trainer", "").replace("Supporter", "");
    let name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if name == "Pokedex" || name == "Pokédex" {
        return name;
    }

    match name.strip_suffix("ex") {
        Some(base) => format!("{} EX", base.trim_end()).trim().to_string(),
        None => name,
    }
}
