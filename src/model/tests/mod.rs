mod tests_equality;
