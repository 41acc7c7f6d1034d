//! Embedded geography dataset used by the question generator.
//!
//! Populations are rounded recent estimates; they only need to order
//! countries against each other, not be census-accurate.

pub struct Country {
    pub name: &'static str,
    pub flag: &'static str,
    pub population: u64,
}

pub const COUNTRIES: &[Country] = &[
    Country { name: "United States", flag: "🇺🇸", population: 334_900_000 },
    Country { name: "Canada", flag: "🇨🇦", population: 38_900_000 },
    Country { name: "Mexico", flag: "🇲🇽", population: 128_500_000 },
    Country { name: "Brazil", flag: "🇧🇷", population: 216_400_000 },
    Country { name: "Argentina", flag: "🇦🇷", population: 45_800_000 },
    Country { name: "Chile", flag: "🇨🇱", population: 19_600_000 },
    Country { name: "Colombia", flag: "🇨🇴", population: 52_100_000 },
    Country { name: "Peru", flag: "🇵🇪", population: 34_400_000 },
    Country { name: "United Kingdom", flag: "🇬🇧", population: 67_700_000 },
    Country { name: "France", flag: "🇫🇷", population: 68_200_000 },
    Country { name: "Germany", flag: "🇩🇪", population: 84_500_000 },
    Country { name: "Italy", flag: "🇮🇹", population: 58_900_000 },
    Country { name: "Spain", flag: "🇪🇸", population: 48_400_000 },
    Country { name: "Portugal", flag: "🇵🇹", population: 10_500_000 },
    Country { name: "Netherlands", flag: "🇳🇱", population: 17_900_000 },
    Country { name: "Belgium", flag: "🇧🇪", population: 11_800_000 },
    Country { name: "Switzerland", flag: "🇨🇭", population: 8_900_000 },
    Country { name: "Austria", flag: "🇦🇹", population: 9_100_000 },
    Country { name: "Sweden", flag: "🇸🇪", population: 10_600_000 },
    Country { name: "Norway", flag: "🇳🇴", population: 5_500_000 },
    Country { name: "Finland", flag: "🇫🇮", population: 5_600_000 },
    Country { name: "Denmark", flag: "🇩🇰", population: 5_900_000 },
    Country { name: "Poland", flag: "🇵🇱", population: 36_800_000 },
    Country { name: "Ukraine", flag: "🇺🇦", population: 36_700_000 },
    Country { name: "Greece", flag: "🇬🇷", population: 10_300_000 },
    Country { name: "Turkey", flag: "🇹🇷", population: 85_300_000 },
    Country { name: "Russia", flag: "🇷🇺", population: 143_800_000 },
    Country { name: "China", flag: "🇨🇳", population: 1_425_000_000 },
    Country { name: "India", flag: "🇮🇳", population: 1_428_000_000 },
    Country { name: "Japan", flag: "🇯🇵", population: 123_300_000 },
    Country { name: "South Korea", flag: "🇰🇷", population: 51_700_000 },
    Country { name: "Vietnam", flag: "🇻🇳", population: 98_900_000 },
    Country { name: "Thailand", flag: "🇹🇭", population: 71_800_000 },
    Country { name: "Indonesia", flag: "🇮🇩", population: 277_500_000 },
    Country { name: "Philippines", flag: "🇵🇭", population: 117_300_000 },
    Country { name: "Pakistan", flag: "🇵🇰", population: 240_500_000 },
    Country { name: "Bangladesh", flag: "🇧🇩", population: 172_900_000 },
    Country { name: "Iran", flag: "🇮🇷", population: 89_200_000 },
    Country { name: "Iraq", flag: "🇮🇶", population: 45_500_000 },
    Country { name: "Saudi Arabia", flag: "🇸🇦", population: 36_900_000 },
    Country { name: "Israel", flag: "🇮🇱", population: 9_800_000 },
    Country { name: "Egypt", flag: "🇪🇬", population: 112_700_000 },
    Country { name: "Nigeria", flag: "🇳🇬", population: 223_800_000 },
    Country { name: "Ethiopia", flag: "🇪🇹", population: 126_500_000 },
    Country { name: "Kenya", flag: "🇰🇪", population: 55_100_000 },
    Country { name: "South Africa", flag: "🇿🇦", population: 60_400_000 },
    Country { name: "Morocco", flag: "🇲🇦", population: 37_800_000 },
    Country { name: "Australia", flag: "🇦🇺", population: 26_600_000 },
    Country { name: "New Zealand", flag: "🇳🇿", population: 5_200_000 },
    Country { name: "Uruguay", flag: "🇺🇾", population: 3_400_000 },
    Country { name: "Uzbekistan", flag: "🇺🇿", population: 35_200_000 },
    Country { name: "United Arab Emirates", flag: "🇦🇪", population: 9_500_000 },
];

pub const US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii", "Idaho",
    "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana",
    "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York",
    "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon",
    "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington",
    "West Virginia", "Wisconsin", "Wyoming",
];
