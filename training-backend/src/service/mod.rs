pub mod department_mutator;
