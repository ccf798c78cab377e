/// Meshes that never react to hover, click or filter highlighting
/// (terrain, facade shells and decorative materials).
pub const BLOCKED_MESH_NAMES: &[&str] = &[
    "SKY_OuterDesign001",
    "Plane371",
    "Plane371_1",
    "Plane373",
    "Cylinder125_2",
    "SKY_Ground001",
    "Mesh003_2",
    "Plane373_1",
    "Mesh003_3",
    "Material21134_1",
    "Material21134_2",
    "Material21134_3",
    "Material21134_4",
    "Material21134_5",
    "Material21134_6",
    "Material21134_7",
    "Material21134_8",
    "Material21134_9",
    "Material21134_10",
    "Material21134_11",
    "Material21134_12",
    "Material21134_13",
    "Material21134_14",
    "Material21134_15",
    "Material21134_16",
    "Material21134_17",
    "Material21134_18",
    "Material21134_19",
    "Material21134_20",
    "Material21134_21",
    "Material21134_22",
    "Material21134_23",
    "Material21134_24",
    "Material21134_25",
    "Material21134_26",
    "Material21134_27",
    "Material21134_28",
    "Material21134_29",
    "Material21134_30",
    "Material21134_31",
    "Material21134_32",
    "Material21134_33",
    "Material21134_34",
    "Material21134_35",
    "Material21134_36",
    "Material21134_37",
    "Material21134_38",
    "Material21134_39",
    "Material21134_40",
    "Material21134_41",
    "Material21134_42",
    "Material21134_43",
    "Material21134_44",
    "Material21134_45",
    "Material21134_46",
    "Material21134_47",
    "Material21134_48",
    "Material21134_49",
    "Material21134_50",
    "Material21134_51",
    "Material21134_52",
    "Material21134_53",
    "Material21134_54",
    "Material21134_55",
    "Material21134_56",
    "Material21134_57",
    "Material21134_58",
    "Material21134_59",
    "Material21134_60",
    "Material21134_61",
    "Material21134_62",
    "Material21134_63",
    "Material21134_64",
    "Material21134_65",
    "Material21134_66",
    "Material21134_67",
    "Material21134_68",
    "Material21134_69",
    "Material21134_70",
    "Material21134_71",
    "Material21134_72",
    "Material21134_73",
    "Material21134_74",
    "Material21134_75",
    "Material21134_76",
    "Material21134_77",
    "Material21134_78",
    "Material21134_79",
    "Material21134_80",
    "Material21134_81",
    "Material21134_82",
    "Material21134_83",
    "Material21134_84",
    "Material21134_85",
    "Material21134_86",
    "Material21134_87",
    "Material21134_88",
    "Material21134_89",
    "Material21134_90",
    "Material21134_91",
    "Material21134_92",
    "Material21134_93",
    "Material21134_94",
    "Material21134_95",
    "Material21134_96",
    "Material21134_97",
    "Material21134_98",
    "Material21134_99",
    "Material21134_100",
    "Material2201",
    "Material2202",
    "Material2203",
    "Material2204",
    "Material2209",
    "Material2210",
    "Material22727",
    "Material22728",
    "Material22729",
    "Material22740",
    "Material22741",
    "Material22742",
    "Material22743",
    "Material22744",
    "Material22745",
    "Material2291",
    "Material2292",
    "Material2351",
    "Material2352",
    "Material2353",
    "Material2354",
    "Material2355",
    "Material2356",
    "Material2397",
    "Material2398",
    "Material2399",
    "Material3022",
    "Material32323",
    "Material32417",
    "Material32441",
    "Material32504",
    "Material32636",
    "Material32640",
    "Material32642",
    "Material32644",
    "Material32693",
    "Material32694",
    "Material32695",
    "Material32696",
    "Material32697",
    "Material32698",
    "Material32823",
    "Material32827",
    "Material32829",
    "Material32831",
    "Material3920",
    "Material3921",
    "Material3922",
    "Material3923",
    "Material3925",
    "Material3927",
    "Material3965",
];

/// Meshes that are always selected together, overriding companion pairing.
pub const MESH_GROUPS: &[&[&str]] = &[
    &["Plane429", "Plane429_1", "Plane429_2", "Plane429_3"],
    &["Plane428", "Plane428_1", "Plane428_2", "Plane428_3"],
    &["Plane369", "Plane369_1", "Plane369_2", "Plane369_3"],
    &["Plane367", "Plane367_1", "Plane367_2", "Plane367_3"],
    &["Plane368", "Plane368_1", "Plane368_2", "Plane368_3"],
    // Floors 54 and 55 share one set of duplex units.
    &[
        "Plane418", "Plane418_1", "Plane418_2", "Plane418_3", "Plane419", "Plane419_1",
        "Plane419_2", "Plane419_3",
    ],
];

/// Floors whose units are listed under more than one metadata entry and must be
/// presented as a single merged floor.
#[derive(Debug, Clone, Copy)]
pub struct LinkedFloors {
    /// Floor numbers covered by the link, as chosen in the floor calendar.
    pub floors: &'static [i32],
    /// Metadata entries merged, in order, when any linked mesh is selected.
    pub meta_meshes: &'static [&'static str],
}

impl LinkedFloors {
    /// Floor number shown for the merged selection.
    pub fn display_floor(&self) -> Option<i32> {
        self.floors.iter().copied().min()
    }

    pub fn covers_floor(&self, floor: i32) -> bool {
        self.floors.contains(&floor)
    }

    pub fn covers_group(&self, group: &[&str]) -> bool {
        self.meta_meshes.iter().any(|name| group.contains(name))
    }
}

pub const LINKED_FLOORS: &[LinkedFloors] = &[LinkedFloors {
    floors: &[54, 55],
    meta_meshes: &["Plane418", "Plane419"],
}];

/// Name reported for meshes without a name.
pub const UNNAMED_MESH: &str = "Unnamed mesh";

/// Suffix pairing a mesh with its companion surface.
pub const COMPANION_SUFFIX: &str = "_1";
