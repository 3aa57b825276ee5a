//! Perfect-hash lookup tables mapping Unicode math symbols to LaTeX.

use phf::phf_map;

/// Greek letters (lowercase and uppercase) to LaTeX commands. Uppercase
/// letters that are visually identical to a Latin letter (Alpha, Beta,
/// Epsilon, Zeta, Eta, Iota, Kappa, Mu, Nu, Omicron, Rho, Tau, Chi) map to
/// the bare Latin letter instead of a `\Command`.
pub static GREEK: phf::Map<char, &'static str> = phf_map! {
    '\u{03b1}' => "\\alpha",
    '\u{03b2}' => "\\beta",
    '\u{03b3}' => "\\gamma",
    '\u{03b4}' => "\\delta",
    '\u{03b5}' => "\\epsilon",
    '\u{03b6}' => "\\zeta",
    '\u{03b7}' => "\\eta",
    '\u{03b8}' => "\\theta",
    '\u{03b9}' => "\\iota",
    '\u{03ba}' => "\\kappa",
    '\u{03bb}' => "\\lambda",
    '\u{03bc}' => "\\mu",
    '\u{03bd}' => "\\nu",
    '\u{03be}' => "\\xi",
    '\u{03bf}' => "o",
    '\u{03c0}' => "\\pi",
    '\u{03c1}' => "\\rho",
    '\u{03c2}' => "\\varsigma",
    '\u{03c3}' => "\\sigma",
    '\u{03c4}' => "\\tau",
    '\u{03c5}' => "\\upsilon",
    '\u{03c6}' => "\\phi",
    '\u{03c7}' => "\\chi",
    '\u{03c8}' => "\\psi",
    '\u{03c9}' => "\\omega",
    '\u{0391}' => "A",
    '\u{0392}' => "B",
    '\u{0393}' => "\\Gamma",
    '\u{0394}' => "\\Delta",
    '\u{0395}' => "E",
    '\u{0396}' => "Z",
    '\u{0397}' => "H",
    '\u{0398}' => "\\Theta",
    '\u{0399}' => "I",
    '\u{039a}' => "K",
    '\u{039b}' => "\\Lambda",
    '\u{039c}' => "M",
    '\u{039d}' => "N",
    '\u{039e}' => "\\Xi",
    '\u{039f}' => "O",
    '\u{03a0}' => "\\Pi",
    '\u{03a1}' => "P",
    '\u{03a3}' => "\\Sigma",
    '\u{03a4}' => "T",
    '\u{03a5}' => "\\Upsilon",
    '\u{03a6}' => "\\Phi",
    '\u{03a7}' => "X",
    '\u{03a8}' => "\\Psi",
    '\u{03a9}' => "\\Omega",
};

/// Superscript digits and sign glyphs, each mapping to the bare character
/// that belongs inside a `^{...}` group.
pub static SUPERSCRIPT: phf::Map<char, &'static str> = phf_map! {
    '\u{2070}' => "0",
    '\u{00b9}' => "1",
    '\u{00b2}' => "2",
    '\u{00b3}' => "3",
    '\u{2074}' => "4",
    '\u{2075}' => "5",
    '\u{2076}' => "6",
    '\u{2077}' => "7",
    '\u{2078}' => "8",
    '\u{2079}' => "9",
    '\u{207a}' => "+",
    '\u{207b}' => "-",
    '\u{207c}' => "=",
    '\u{207d}' => "(",
    '\u{207e}' => ")",
    '\u{207f}' => "n",
};

/// Subscript digits and sign glyphs, each mapping to the bare character
/// that belongs inside a `_{...}` group.
pub static SUBSCRIPT: phf::Map<char, &'static str> = phf_map! {
    '\u{2080}' => "0",
    '\u{2081}' => "1",
    '\u{2082}' => "2",
    '\u{2083}' => "3",
    '\u{2084}' => "4",
    '\u{2085}' => "5",
    '\u{2086}' => "6",
    '\u{2087}' => "7",
    '\u{2088}' => "8",
    '\u{2089}' => "9",
    '\u{208a}' => "+",
    '\u{208b}' => "-",
    '\u{208c}' => "=",
    '\u{208d}' => "(",
    '\u{208e}' => ")",
};

/// Mathematical operators, relations, arrows, set/logic, and calculus
/// symbols mapped to LaTeX commands.
pub static OPERATORS: phf::Map<char, &'static str> = phf_map! {
    '\u{00b1}' => "\\pm",
    '\u{2213}' => "\\mp",
    '\u{00d7}' => "\\times",
    '\u{00f7}' => "\\div",
    '\u{2217}' => "\\ast",
    '\u{2218}' => "\\circ",
    '\u{2219}' => "\\bullet",
    '\u{2264}' => "\\leq",
    '\u{2265}' => "\\geq",
    '\u{2260}' => "\\neq",
    '\u{2248}' => "\\approx",
    '\u{2243}' => "\\simeq",
    '\u{2245}' => "\\cong",
    '\u{221d}' => "\\propto",
    '\u{226a}' => "\\ll",
    '\u{226b}' => "\\gg",
    '\u{2261}' => "\\equiv",
    '\u{223c}' => "\\sim",
    '\u{2192}' => "\\rightarrow",
    '\u{2190}' => "\\leftarrow",
    '\u{2194}' => "\\leftrightarrow",
    '\u{21d2}' => "\\Rightarrow",
    '\u{21d0}' => "\\Leftarrow",
    '\u{21d4}' => "\\Leftrightarrow",
    '\u{21a6}' => "\\mapsto",
    '\u{2191}' => "\\uparrow",
    '\u{2193}' => "\\downarrow",
    '\u{2208}' => "\\in",
    '\u{2209}' => "\\notin",
    '\u{220b}' => "\\ni",
    '\u{2282}' => "\\subset",
    '\u{2286}' => "\\subseteq",
    '\u{2283}' => "\\supset",
    '\u{2287}' => "\\supseteq",
    '\u{222a}' => "\\cup",
    '\u{2229}' => "\\cap",
    '\u{2216}' => "\\setminus",
    '\u{2205}' => "\\emptyset",
    '\u{2200}' => "\\forall",
    '\u{2203}' => "\\exists",
    '\u{2204}' => "\\nexists",
    '\u{00ac}' => "\\neg",
    '\u{2227}' => "\\wedge",
    '\u{2228}' => "\\vee",
    '\u{22a5}' => "\\perp",
    '\u{2225}' => "\\parallel",
    '\u{2211}' => "\\sum",
    '\u{220f}' => "\\prod",
    '\u{222b}' => "\\int",
    '\u{222c}' => "\\iint",
    '\u{222d}' => "\\iiint",
    '\u{222e}' => "\\oint",
    '\u{2202}' => "\\partial",
    '\u{2207}' => "\\nabla",
    '\u{221a}' => "\\sqrt",
    '\u{221e}' => "\\infty",
    '\u{2220}' => "\\angle",
    '\u{22a2}' => "\\vdash",
    '\u{22a8}' => "\\models",
    '\u{2295}' => "\\oplus",
    '\u{2297}' => "\\otimes",
    '\u{2299}' => "\\odot",
    '\u{00b0}' => "^\\circ",
    '\u{2032}' => "'",
    '\u{2033}' => "''",
    '\u{22c5}' => "\\cdot",
    '\u{2026}' => "\\ldots",
    '\u{22ef}' => "\\cdots",
    '\u{22ee}' => "\\vdots",
    '\u{22f1}' => "\\ddots",
    '\u{2308}' => "\\lceil",
    '\u{2309}' => "\\rceil",
    '\u{230a}' => "\\lfloor",
    '\u{230b}' => "\\rfloor",
    '\u{27e8}' => "\\langle",
    '\u{27e9}' => "\\rangle",
    '\u{2124}' => "\\mathbb{Z}",
    '\u{211d}' => "\\mathbb{R}",
    '\u{2115}' => "\\mathbb{N}",
    '\u{211a}' => "\\mathbb{Q}",
    '\u{2102}' => "\\mathbb{C}",
};

/// Lookup across all three math tables; returns `None` for ordinary text.
pub fn lookup(c: char) -> Option<&'static str> {
    GREEK.get(&c).or_else(|| OPERATORS.get(&c)).copied()
}
