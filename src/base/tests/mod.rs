mod tests_names;
