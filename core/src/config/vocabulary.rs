//! Built-in dimension lists. These mirror the datahub taxonomy at the time of
//! writing and can be replaced from the config file.

const PRODUCTS: &[&str] = &[
    "accommodation",
    "permanent_offering",
    "reca",
    "temporary_offering",
    "meetingroom",
];

const CHANNELS: &[&str] = &[
    "westtoer",
    "fietsen_en_wandelen",
    "kenniscentrum",
    "dagtrips_voor_groepen",
    "flanders_fields",
    "flanders_fields_nl",
    "flanders_fields_fr",
    "flanders_fields_en",
    "flanders_fields_de",
    "leiestreek",
    "leiestreek_nl",
    "leiestreek_fr",
    "leiestreek_en",
    "leiestreek_de",
    "de_kust",
    "de_kust_nl",
    "de_kust_en",
    "de_kust_fr",
    "de_kust_de",
    "brugse_ommeland",
    "brugse_ommeland_nl",
    "brugse_ommeland_fr",
    "brugse_ommeland_de",
    "brugse_ommeland_en",
    "westhoek",
    "westhoek_nl",
    "westhoek_fr",
    "meetingkust",
    "meetingkust_nl",
    "meetingkust_fr",
    "300_jaar_grens",
    "300_jaar_grens_nl",
    "300_jaar_grens_fr",
    "300_jaar_grens_en",
    "300_jaar_grens_de",
    "autoroutes",
    "itrip_coast",
    "kustwandelroute",
    "west-vlinderen",
    "iedereen_flandrien",
];

const TOUR_TYPES: &[&str] = &[
    "aanlegplaats",
    "adventure",
    "attractiepark",
    "battle_field_tour",
    "begraafplaats_amerikaans",
    "begraafplaats_belgisch",
    "begraafplaats_commonwealth",
    "begraafplaats_duits",
    "begraafplaats_frans",
    "belfort",
    "bezoekerscentrum",
    "bioscoop",
    "bistro",
    "bootverhuur",
    "bos",
    "brouwerij",
    "cafe",
    "camping",
    "casino",
    "concert",
    "cultureel_centrum",
    "domein",
    "festival",
    "fietsen",
    "fietsverhuur",
    "film",
    "frontvlucht",
    "gastenkamer",
    "golf",
    "herdenkingsplechtigheid",
    "historisch_gebouw",
    "hoeve_om_te_proeven",
    "hotel",
    "huifkartocht",
    "ijspiste",
    "jachthaven",
    "jeugdverblijf",
    "kampeerautoterrein",
    "kampeerhut",
    "kano_kajak_verhuur",
    "kinderboerderij",
    "manege",
    "minicamping",
    "monument",
    "museum",
    "onbepaald",
    "oorlogssite",
    "park_tuin",
    "pretpark",
    "religieus_gebouw",
    "restaurant",
    "scooter_solex_verhuur",
    "shopping",
    "shop_winkel",
    "speciale_markt",
    "speeltuin",
    "sportaccommodatie",
    "sportwedstrijd",
    "stoet",
    "stokerij",
    "strandclub",
    "tearoom",
    "tentoonstelling",
    "theater",
    "toeristische_dienst",
    "vakantiecentrum",
    "vakantielogies",
    "vakantiepark",
    "vakantiewoning",
    "verblijfpark",
    "vuurwerk",
    "wandelen",
    "waterrecreatie",
    "wekelijkse_markt",
    "wellness",
    "wijngaard",
    "zaal",
    "zwemgelegenheid",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn default_products() -> Vec<String> {
    owned(PRODUCTS)
}

pub fn default_channels() -> Vec<String> {
    owned(CHANNELS)
}

pub fn default_tour_types() -> Vec<String> {
    owned(TOUR_TYPES)
}
