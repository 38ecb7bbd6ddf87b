/// reaction equation string -> stoichiometric maps
/// # Examples
/// ```
/// use ThermoExplorer::Reactions::equation_parser::parse;
///
/// let reaction = parse("2H2(g) + O2(g) -> 2H2O(l)").unwrap();
/// assert_eq!(reaction.reactants["H2"], 2.0);
/// assert_eq!(reaction.products["H2O"], 2.0);
/// ```
pub mod equation_parser;
/// chemical formula -> element counts
pub mod formula_decomposer;
/// reaction strings -> named numeric features
pub mod featurizer;
