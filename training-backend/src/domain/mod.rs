pub mod department_model;
