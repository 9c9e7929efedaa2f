/// Display labels for field names whose generic title-casing reads poorly or needs expansion.
const FIELD_LABELS: &[(&str, &str)] = &[
    ("projectAddress", "Project Address"),
    ("ownerName", "Owner Name"),
    ("ownerPhone", "Owner Phone"),
    ("ownerEmail", "Owner Email"),
    ("contractorName", "Contractor Name"),
    ("contractorLicense", "Contractor License"),
    ("contractorPhone", "Contractor Phone"),
    ("insurancePolicy", "Insurance Policy"),
    ("projectDescription", "Project Description"),
    ("workType", "Work Type"),
    ("estimatedCost", "Estimated Cost"),
    ("startDate", "Start Date"),
    ("buildingArea", "Building Area"),
    ("electricianName", "Electrician Name"),
    ("electricianLicense", "Electrician License"),
    ("electricianPhone", "Electrician Phone"),
    ("electricianCompany", "Electrician Company"),
    ("workDescription", "Work Description"),
    ("serviceType", "Service Type"),
    ("numCircuits", "Number of Circuits"),
    ("panelUpgrade", "Panel Upgrade"),
    ("newService", "New Service"),
    ("specialRequirements", "Special Requirements"),
    ("plumberName", "Plumber Name"),
    ("plumberLicense", "Plumber License"),
    ("plumberPhone", "Plumber Phone"),
    ("plumberCompany", "Plumber Company"),
    ("waterConnection", "Water Connection"),
    ("sewerConnection", "Sewer Connection"),
    ("gasLines", "Gas Lines"),
    ("numFixtures", "Number of Fixtures"),
    ("waterHeater", "Water Heater"),
    ("backflowPrevention", "Backflow Prevention"),
    ("demolitionScope", "Demolition Scope"),
    ("salvagePlan", "Salvage Plan"),
    ("wasteDisposal", "Waste Disposal"),
    ("environmentalImpact", "Environmental Impact"),
    ("mitigationPlan", "Mitigation Plan"),
];

pub fn field_label(field: &str) -> String {
    FIELD_LABELS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| title_case(field))
}

/// `numStories` -> `Num Stories`, `duration` -> `Duration`.
fn title_case(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for ch in field.chars() {
        if matches!(ch, '_' | '-' | ' ') {
            words.push(String::new());
            continue;
        }
        let starts_word = ch.is_uppercase() || words.is_empty();
        if starts_word && words.last().map_or(true, |word| !word.is_empty()) {
            words.push(String::new());
        }
        if let Some(word) = words.last_mut() {
            word.push(ch);
        }
    }

    words
        .into_iter()
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::field_label;

    #[test]
    fn table_entries_win() {
        assert_eq!(field_label("numCircuits"), "Number of Circuits");
        assert_eq!(field_label("ownerName"), "Owner Name");
    }

    #[test]
    fn unknown_fields_fall_back_to_title_case() {
        assert_eq!(field_label("duration"), "Duration");
        assert_eq!(field_label("parcelNumber"), "Parcel Number");
        assert_eq!(field_label("lot_size"), "Lot Size");
        assert_eq!(field_label(""), "");
    }
}
