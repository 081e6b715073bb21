//! Element symbols and metal-centre detection.
//!
//! Only the atomic number is needed here: it decides which atoms of a full
//! structure can serve as an octahedral centre.

/// Element symbols ordered by atomic number, H (1) through Mt (109).
const SYMBOLS: [&str; 109] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt",
];

/// Atomic number for an atom label.
///
/// Labels are matched case-insensitively on their leading letters, so `"Fe"`,
/// `"FE"` and `"Fe1"` all resolve to 26.
///
/// # Examples
///
/// ```
/// use octadist::elements::atomic_number;
///
/// assert_eq!(atomic_number("Fe1"), Some(26));
/// assert_eq!(atomic_number("n"), Some(7));
/// assert_eq!(atomic_number("Xx"), None);
/// ```
pub fn atomic_number(label: &str) -> Option<u32> {
    let symbol: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if symbol.is_empty() {
        return None;
    }

    SYMBOLS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(&symbol))
        .map(|i| i as u32 + 1)
}

/// Whether the label names a d- or f-block metal (Z in 21–30, 39–48, 57–80 or 89–109).
pub fn is_metal_center(label: &str) -> bool {
    matches!(
        atomic_number(label),
        Some(21..=30) | Some(39..=48) | Some(57..=80) | Some(89..=109)
    )
}
