// Built-in electronic-music taxonomy tables
//
// Order matters everywhere in this file: genre order drives direct-match and
// filename-pass insertion order, alias order drives substring resolution, and
// both feed the ranking tie-break.

use super::{
    AudioFeature, Comparison, FeatureCondition, FeatureRule, PatternKind, Taxonomy,
    TaxonomyBuilder,
};

/// (genre id, aliases, keywords)
const GENRES: &[(&str, &[&str], &[&str])] = &[
    // Pure ambient & space
    ("ambient", &["ambient", "pure ambient", "classic ambient"],
        &["ambient", "pure", "classic", "atmospheric", "meditation", "relaxing", "calm"]),
    ("dark_ambient", &["dark ambient", "black ambient", "horror ambient"],
        &["dark", "black", "horror", "sinister", "ominous", "scary", "haunting"]),
    ("space_ambient", &["space music", "space ambient", "cosmic ambient", "stellar ambient"],
        &["space", "cosmic", "stellar", "galaxy", "universe", "celestial", "astral"]),
    ("isolationism", &["isolationism", "minimalist ambient", "cold ambient"],
        &["isolationism", "minimal", "cold", "distant", "sparse", "empty"]),
    ("drone_ambient", &["drone ambient", "drone", "hypnotic ambient", "continuous ambient"],
        &["drone", "continuous", "hypnotic", "sustained", "monotone", "meditative"]),
    // Atmospheric / fantasy
    ("dungeon_synth", &["dungeon synth", "fantasy ambient", "medieval ambient"],
        &["dungeon", "fantasy", "medieval", "castle", "knight", "sword", "magic"]),
    ("ethereal_ambient", &["ethereal ambient", "ethereal", "angelic ambient"],
        &["ethereal", "angelic", "heavenly", "divine", "spiritual", "transcendent"]),
    ("neoclassical_ambient", &["neoclassical ambient", "orchestral ambient", "symphonic ambient"],
        &["neoclassical", "orchestral", "symphonic", "classical", "strings"]),
    ("new_age_ambient", &["new age", "healing ambient", "meditation music", "wellness ambient"],
        &["new age", "healing", "wellness", "therapy", "chakra", "meditation"]),
    // Dub & psy
    ("ambient_dub", &["ambient dub", "dub ambient", "spacious dub"],
        &["dub", "echo", "reverb", "spacious", "deep", "atmospheric"]),
    ("psydub", &["psydub", "dub", "psychedelic dub", "bass music"],
        &["psychedelic", "dub", "bass", "trippy", "deep"]),
    ("dub_techno", &["dub techno", "minimal dub", "deep techno", "atmospheric techno"],
        &["dub", "minimal", "deep", "atmospheric", "echo", "spacious"]),
    ("chill_dub", &["chill dub", "downtempo dub", "relaxed dub"],
        &["chill", "dub", "downtempo", "relaxed", "laid-back"]),
    // Industrial & darker side
    ("ambient_industrial", &["ambient industrial", "industrial ambient", "dark industrial"],
        &["industrial", "mechanical", "harsh", "metallic", "factory"]),
    ("death_industrial", &["death industrial", "harsh ambient", "extreme industrial"],
        &["death", "extreme", "harsh", "brutal", "aggressive"]),
    ("power_noise", &["power noise", "rhythmic noise", "harsh noise"],
        &["noise", "rhythmic", "harsh", "distorted", "aggressive"]),
    ("illbient", &["illbient", "ambient hip hop", "industrial downtempo"],
        &["illbient", "hip hop", "urban", "street", "downtempo"]),
    // Dream & hypnagogic
    ("dreampunk", &["dreampunk", "dream ambient", "surreal ambient"],
        &["dream", "surreal", "fantasy", "ethereal", "otherworldly"]),
    ("dream_ambient", &["dream ambient", "oneiric ambient", "sleep ambient"],
        &["dream", "sleep", "oneiric", "subconscious", "peaceful"]),
    ("hypnagogic_pop", &["hypnagogic pop", "chillwave", "lo-fi ambient"],
        &["hypnagogic", "chillwave", "lo-fi", "nostalgic", "dreamy"]),
    ("vaporwave_ambient", &["vaporwave ambient", "mallsoft", "retro ambient"],
        &["vaporwave", "mallsoft", "retro", "80s", "nostalgic"]),
    // Experimental ambient
    ("electroacoustic_ambient", &["electroacoustic ambient", "acousmatic", "concrete ambient"],
        &["electroacoustic", "acousmatic", "concrete", "experimental"]),
    ("soundscape", &["soundscape", "field recording", "environmental ambient"],
        &["soundscape", "field recording", "environmental", "natural"]),
    ("microsound", &["microsound", "micro ambient", "granular ambient"],
        &["microsound", "granular", "micro", "detailed", "precise"]),
    ("lowercase", &["lowercase", "ultra quiet", "minimal sound"],
        &["lowercase", "quiet", "minimal", "subtle", "whisper"]),
    ("onkyokei", &["onkyokei", "japanese minimal", "extreme reduction"],
        &["onkyokei", "japanese", "minimal", "reduction", "silence"]),
    // Ritual / mystical
    ("ritual_ambient", &["ritual ambient", "ceremonial ambient", "mystical ambient"],
        &["ritual", "ceremonial", "mystical", "sacred", "spiritual"]),
    ("martial_ambient", &["martial ambient", "military ambient", "war ambient"],
        &["martial", "military", "war", "battle", "heroic"]),
    ("shamanic_ambient", &["shamanic ambient", "tribal ambient", "spiritual ambient"],
        &["shamanic", "tribal", "spiritual", "indigenous", "ancient"]),
    // Fusion ambient
    ("jazz_ambient", &["jazz ambient", "nu-jazztronica", "ambient jazz"],
        &["jazz", "nu-jazz", "smooth", "improvisation", "saxophone"]),
    ("post_rock_ambient", &["post-rock ambient", "ambient guitars", "cinematic ambient"],
        &["post-rock", "guitar", "cinematic", "emotional", "epic"]),
    ("folk_ambient", &["folk ambient", "folktronica", "organic ambient"],
        &["folk", "acoustic", "organic", "natural", "traditional"]),
    ("electroacoustic_improv", &["electroacoustic improvisation", "free ambient", "improv ambient"],
        &["improvisation", "free", "experimental", "spontaneous"]),
    // Techno
    ("techno", &["techno", "minimal techno", "detroit techno", "berlin techno", "acid techno"],
        &["techno", "electronic", "dance", "club", "rave", "underground", "driving"]),
    ("industrial_techno", &["industrial techno", "hard techno", "industrial", "ebm", "power electronics"],
        &["industrial", "harsh", "aggressive", "mechanical", "distorted", "hard"]),
    ("acid_techno", &["acid techno", "acid", "303", "tb-303", "acid house"],
        &["acid", "303", "squelch", "distorted", "psychedelic"]),
    // House
    ("house", &["house", "classic house", "chicago house", "vocal house"],
        &["house", "groove", "funky", "rhythmic", "bass", "four-on-floor"]),
    ("deep_house", &["deep house", "soulful house", "jazzy house", "organic house"],
        &["deep", "soulful", "jazzy", "organic", "warm", "smooth"]),
    ("tech_house", &["tech house", "minimal house", "groove house"],
        &["tech", "minimal", "groove", "driving", "percussive"]),
    ("progressive_house", &["progressive house", "prog house", "melodic house"],
        &["progressive", "melodic", "uplifting", "emotional", "journey"]),
    ("tribal_house", &["tribal house", "afro house", "ethnic house", "percussion house"],
        &["tribal", "ethnic", "percussion", "drums", "ritual", "african"]),
    // Trance
    ("trance", &["trance", "classic trance", "vocal trance", "uplifting trance"],
        &["trance", "uplifting", "euphoric", "emotional", "melodic", "epic"]),
    ("progressive_trance", &["progressive trance", "prog trance", "melodic trance"],
        &["progressive", "journey", "evolving", "atmospheric", "deep"]),
    ("psytrance", &["psytrance", "psychedelic trance", "goa trance", "full-on", "dark psy"],
        &["psychedelic", "trippy", "forest", "goa", "full-on", "dark"]),
    ("hard_trance", &["hard trance", "acid trance", "schranz"],
        &["hard", "schranz", "aggressive", "driving", "intense"]),
    // Breakbeat & drum'n'bass
    ("drum_and_bass", &["drum and bass", "dnb", "jungle", "liquid dnb", "neurofunk"],
        &["dnb", "jungle", "liquid", "neurofunk", "amen", "breakbeat"]),
    ("breakbeat", &["breakbeat", "big beat", "nu skool breaks", "funky breaks"],
        &["breaks", "funky", "big beat", "chopped", "sampled"]),
    ("breakcore", &["breakcore", "digital hardcore", "speedcore", "mashcore"],
        &["breakcore", "hardcore", "chaotic", "aggressive", "digital"]),
    // Experimental & IDM
    ("experimental", &["experimental", "idm", "glitch", "avant-garde", "noise", "microsound"],
        &["experimental", "abstract", "avant", "weird", "unusual", "innovative"]),
    ("glitch", &["glitch", "glitch hop", "microhouse", "clicks and cuts"],
        &["glitch", "clicks", "cuts", "digital", "fragmented", "stuttering"]),
    ("idm", &["idm", "intelligent dance music", "braindance", "electronica"],
        &["intelligent", "braindance", "complex", "cerebral", "intricate"]),
    // Downtempo & chill
    ("downtempo", &["downtempo", "chillout", "trip hop", "lounge", "nu jazz"],
        &["downtempo", "chill", "relaxed", "slow", "mellow", "laid-back"]),
    ("trip_hop", &["trip hop", "abstract hip hop", "instrumental hip hop"],
        &["trip hop", "abstract", "hip hop", "cinematic", "moody"]),
    ("chillstep", &["chillstep", "melodic dubstep", "future garage", "liquid dubstep"],
        &["chill", "melodic", "emotional", "dubstep", "liquid"]),
    // Bass music
    ("future_bass", &["future bass", "melodic bass", "chill bass", "wave"],
        &["future", "melodic", "emotional", "uplifting", "colorful"]),
    ("trap", &["trap", "future trap", "hybrid trap", "festival trap"],
        &["trap", "hip hop", "festival", "heavy", "aggressive"]),
    ("uk_garage", &["uk garage", "2-step", "speed garage", "bassline"],
        &["garage", "2-step", "shuffled", "syncopated", "uk"]),
    ("bass_music", &["bass music", "heavy bass", "sub bass", "bass heavy"],
        &["bass", "heavy bass", "sub bass", "low end", "deep bass"]),
    // Hardcore & hard dance
    ("hardcore", &["hardcore", "gabber", "happy hardcore", "frenchcore"],
        &["hardcore", "gabber", "aggressive", "fast", "intense"]),
    ("hardstyle", &["hardstyle", "euphoric hardstyle", "rawstyle", "hardcore"],
        &["hardstyle", "euphoric", "raw", "kick", "reverse bass"]),
    ("speedcore", &["speedcore", "terrorcore", "extratone", "splittercore"],
        &["speedcore", "terror", "extreme", "fast", "chaotic"]),
    // Retro & synthwave
    ("synthwave", &["synthwave", "retrowave", "outrun", "darksynth", "cyberpunk"],
        &["synthwave", "retro", "80s", "neon", "cyberpunk", "nostalgic"]),
    ("vaporwave", &["vaporwave", "mallsoft", "future funk", "slushwave"],
        &["vaporwave", "aesthetic", "nostalgic", "dreamy", "slowed"]),
    ("new_wave", &["new wave", "synthpop", "darkwave", "coldwave"],
        &["new wave", "synthpop", "dark", "cold", "minimal"]),
    // Minimal & microhouse
    ("minimal", &["minimal", "microhouse", "minimal house", "minimal techno"],
        &["minimal", "repetitive", "subtle", "hypnotic", "stripped"]),
    ("microhouse", &["microhouse", "minimal house", "clicks and cuts house"],
        &["micro", "clicks", "minimal", "detailed", "precise"]),
    // Electro
    ("electro", &["electro", "electro funk", "miami bass", "freestyle"],
        &["electro", "funk", "robot", "vocoder", "miami"]),
    ("electroclash", &["electroclash", "new rave", "fidget house"],
        &["electroclash", "new rave", "fidget", "aggressive"]),
    // Specialty & fusion
    ("world_electronic", &["world electronic", "ethnic electronic", "tribal electronic"],
        &["world", "ethnic", "traditional", "fusion", "cultural"]),
    ("cinematic", &["cinematic", "soundtrack", "film score", "epic electronic"],
        &["cinematic", "soundtrack", "epic", "emotional", "orchestral"]),
];

/// (genre bucket, min bpm, max bpm); ranges overlap on purpose
const TEMPO_RANGES: &[(&str, f64, f64)] = &[
    ("ambient", 60.0, 90.0),
    ("downtempo", 70.0, 100.0),
    ("house", 120.0, 130.0),
    ("techno", 120.0, 150.0),
    ("trance", 130.0, 140.0),
    ("drum_and_bass", 160.0, 180.0),
    ("hardcore", 160.0, 200.0),
    ("dubstep", 140.0, 150.0),
    ("breakbeat", 130.0, 150.0),
];

/// Loose-name families for the alias resolver, in resolution order
const ALIASES: &[(&str, &[&str])] = &[
    ("ambient", &["chillout", "new age", "meditation", "relaxing"]),
    ("techno", &["electronic dance", "edm", "club", "rave"]),
    ("house", &["deep house", "tech house", "progressive house"]),
    ("trance", &["progressive trance", "uplifting trance", "psytrance"]),
    ("dubstep", &["brostep", "future bass", "bass music"]),
    ("drum_and_bass", &["dnb", "jungle", "liquid dnb"]),
    ("industrial", &[
        "ebm", "dark electronic", "harsh",
        "industrial ambient", "ambient industrial", "death industrial",
        "power noise", "power electronics", "rhythmic noise", "harsh noise",
    ]),
    ("experimental", &["idm", "glitch", "abstract", "avant-garde"]),
];

/// Genre-family vocabulary matched against the filename
const FAMILY_PATTERNS: &[(&str, &[&str])] = &[
    ("ambient", &["amb", "drone", "atmospheric", "space", "calm", "meditation",
        "peaceful", "relax", "chill", "soft", "quiet", "gentle"]),
    ("techno", &["tech", "minimal", "detroit", "hard", "driving", "industrial",
        "machine", "robot", "cyber", "digital", "electronic"]),
    ("house", &["house", "deep", "funky", "groove", "disco", "dance",
        "club", "party", "beat", "rhythm"]),
    ("trance", &["trance", "uplifting", "progressive", "epic", "emotional",
        "euphoric", "energy", "psych", "goa"]),
    ("dubstep", &["dub", "bass", "wobble", "drop", "heavy", "aggressive",
        "distorted", "glitch", "step"]),
    ("industrial", &["industrial", "ebm", "dark", "metal", "noise", "distortion",
        "aggressive", "mechanical"]),
    ("ambient_industrial", &[r"ambient\s*industrial", r"industrial\s*ambient"]),
    ("death_industrial", &[r"death\s*industrial"]),
    ("power_noise", &[r"power\s*noise", r"rhythmic\s*noise", r"power\s*electronics", r"harsh\s*noise"]),
    ("drum_and_bass", &["dnb", "drum", "bass", "jungle", "breakbeat", "liquid",
        "neurofunk", "jump", "break"]),
    ("synthwave", &["synth", "retro", "80s", "neon", "cyber", "outrun",
        "vaporwave", "nostalgic", "vintage"]),
    ("experimental", &["experimental", "weird", "strange", "abstract", "avant",
        "unconventional", "unique", "odd", "unusual"]),
];

/// Structural shapes matched against the filename stem
const STRUCTURE_PATTERNS: &[(&str, &[&str])] = &[
    ("minimal", &[r"^\d+$", r"^\d+[a-z]?$"]),
    ("experimental", &[r"[_\-]{2,}", r"[a-z]+_[a-z]+_[a-z]+"]),
    ("ambient", &["long", "extended", r"part\d+", "chapter"]),
    ("techno", &[r"mix\d+", r"set\d+", r"track\d+"]),
];

const FOLDERS: &[(&str, &str)] = &[
    ("ambient", "Ambient"),
    ("dark_ambient", "Dark Ambient"),
    ("space_ambient", "Space Music"),
    ("isolationism", "Isolationism"),
    ("drone_ambient", "Drone"),
    ("dungeon_synth", "Dungeon Synth"),
    ("ethereal_ambient", "Ethereal"),
    ("neoclassical_ambient", "Neoclassical"),
    ("new_age_ambient", "New Age"),
    ("ambient_dub", "Ambient Dub"),
    ("psydub", "Psydub"),
    ("dub_techno", "Dub Techno"),
    ("chill_dub", "Chill Dub"),
    ("ambient_industrial", "Ambient Industrial"),
    ("death_industrial", "Death Industrial"),
    ("power_noise", "Power Noise"),
    ("illbient", "Illbient"),
    ("dreampunk", "Dreampunk"),
    ("dream_ambient", "Dream Ambient"),
    ("hypnagogic_pop", "Hypnagogic"),
    ("vaporwave_ambient", "Vaporwave"),
    ("electroacoustic_ambient", "Electroacoustic"),
    ("soundscape", "Soundscape"),
    ("microsound", "Microsound"),
    ("lowercase", "Lowercase"),
    ("onkyokei", "Onkyokei"),
    ("ritual_ambient", "Ritual"),
    ("martial_ambient", "Martial"),
    ("shamanic_ambient", "Shamanic"),
    ("jazz_ambient", "Jazz Ambient"),
    ("post_rock_ambient", "Post Rock Ambient"),
    ("folk_ambient", "Folk Ambient"),
    ("electroacoustic_improv", "Electroacoustic Improv"),
    ("field_recording", "Field Recording"),
    ("meditation", "Meditation"),
    ("nature_sounds", "Nature Sounds"),
    ("techno", "Techno"),
    ("industrial_techno", "Industrial Techno"),
    ("acid_techno", "Acid Techno"),
    ("house", "House"),
    ("deep_house", "Deep House"),
    ("tech_house", "Tech House"),
    ("progressive_house", "Progressive House"),
    ("tribal_house", "Tribal House"),
    ("trance", "Trance"),
    ("progressive_trance", "Progressive Trance"),
    ("psytrance", "Psytrance"),
    ("hard_trance", "Hard Trance"),
    ("drum_and_bass", "Drum And Bass"),
    ("breakbeat", "Breakbeat"),
    ("breakcore", "Breakcore"),
    ("experimental", "Experimental"),
    ("glitch", "Glitch"),
    ("idm", "IDM"),
    ("downtempo", "Downtempo"),
    ("trip_hop", "Trip Hop"),
    ("chillstep", "Chillstep"),
    ("future_bass", "Future Bass"),
    ("trap", "Trap"),
    ("uk_garage", "UK Garage"),
    ("bass_music", "Bass Music"),
    ("hardcore", "Hardcore"),
    ("hardstyle", "Hardstyle"),
    ("speedcore", "Speedcore"),
    ("synthwave", "Synthwave"),
    ("vaporwave", "Vaporwave"),
    ("new_wave", "New Wave"),
    ("minimal", "Minimal"),
    ("microhouse", "Microhouse"),
    ("electro", "Electro"),
    ("electroclash", "Electroclash"),
    ("world_electronic", "World Electronic"),
    ("cinematic", "Cinematic"),
];

fn condition(feature: AudioFeature, comparison: Comparison, threshold: f64) -> FeatureCondition {
    FeatureCondition {
        feature,
        comparison,
        threshold,
    }
}

fn feature_rules() -> Vec<FeatureRule> {
    use AudioFeature::*;
    use Comparison::*;

    vec![
        FeatureRule {
            genre: "techno".into(),
            label: "high_energy_dance".into(),
            score: 0.5,
            conditions: vec![condition(Energy, Above, 0.8), condition(Danceability, Above, 0.7)],
        },
        FeatureRule {
            genre: "ambient".into(),
            label: "low_energy_valence".into(),
            score: 0.6,
            conditions: vec![condition(Energy, Below, 0.3), condition(Valence, Below, 0.4)],
        },
        FeatureRule {
            genre: "house".into(),
            label: "high_danceability".into(),
            score: 0.4,
            conditions: vec![condition(Danceability, Above, 0.8), condition(Energy, Above, 0.6)],
        },
        FeatureRule {
            genre: "electronic".into(),
            label: "electronic_features".into(),
            score: 0.3,
            conditions: vec![condition(Acousticness, Below, 0.1), condition(Energy, Above, 0.7)],
        },
    ]
}

fn add_patterns(
    mut builder: TaxonomyBuilder,
    table: &[(&str, &[&str])],
    kind: PatternKind,
) -> TaxonomyBuilder {
    for (genre, patterns) in table {
        for pattern in *patterns {
            builder = builder
                .filename_pattern(genre, pattern, kind)
                .expect("built-in filename patterns are valid regexes");
        }
    }
    builder
}

pub(super) fn build() -> Taxonomy {
    let mut builder = Taxonomy::builder();

    for (id, aliases, keywords) in GENRES {
        builder = builder.genre(id, aliases, keywords);
    }
    for (genre, min, max) in TEMPO_RANGES {
        builder = builder.tempo_range(genre, *min, *max);
    }
    for (genre, aliases) in ALIASES {
        for alias in *aliases {
            builder = builder.alias(alias, genre);
        }
    }
    builder = add_patterns(builder, FAMILY_PATTERNS, PatternKind::Family);
    builder = add_patterns(builder, STRUCTURE_PATTERNS, PatternKind::Structure);
    for rule in feature_rules() {
        builder = builder.feature_rule(rule);
    }
    for (genre, folder) in FOLDERS {
        builder = builder.folder(genre, folder);
    }

    builder.build()
}
