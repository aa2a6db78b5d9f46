//! Ruling deities of the Chaturvimsamsa (D24) and Shashtiamsa (D60) parts.

/// Walked forward from Leo for odd signs and in reverse from Cancer for even signs.
pub const CHATURVIMSAMSA_DEITIES: [&str; 12] = [
    "Skanda",
    "Parashudhara",
    "Anala",
    "Vishwakarma",
    "Bhaga",
    "Mitra",
    "Maya",
    "Antaka",
    "Vrishadhwaja",
    "Govinda",
    "Madana",
    "Bhima",
];

/// Indexed by the absolute half-degree count modulo 60.
pub const SHASHTIAMSA_DEITIES: [&str; 60] = [
    "Ghora",
    "Rakshasa",
    "Deva",
    "Kubera",
    "Yaksha",
    "Kinnara",
    "Bhrashta",
    "Kulaghna",
    "Garala",
    "Vahni",
    "Maya",
    "Purishaka",
    "Apampati",
    "Marutwan",
    "Kaala",
    "Sarpa",
    "Amrita",
    "Indu",
    "Mridu",
    "Komala",
    "Heramba",
    "Brahma",
    "Vishnu",
    "Maheshwara",
    "Deva",
    "Ardra",
    "Kalinasa",
    "Kshitisa",
    "Kamalakara",
    "Gulika",
    "Mrityu",
    "Kaala",
    "Davagni",
    "Ghora",
    "Yama",
    "Kantaka",
    "Sudha",
    "Amrita",
    "Poornachandra",
    "Vishadagdha",
    "Kulanasa",
    "Vamsakshaya",
    "Utpata",
    "Kaala",
    "Saumya",
    "Komala",
    "Sheetala",
    "Karaladamshtra",
    "Chandramukhi",
    "Praveena",
    "Kalapavaka",
    "Dandayudha",
    "Nirmala",
    "Saumya",
    "Kroora",
    "Atisheetala",
    "Amrita",
    "Payodhi",
    "Bhramana",
    "Chandrarekha",
];
