use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Examples:
      # Writing a value explicitly
      %BINARY_NAME% data.bin put mykey "Hello, world!"

      # Writing a value from stdin
      echo "Hello, world!" | %BINARY_NAME% data.bin put mykey
      cat file.txt | %BINARY_NAME% data.bin put mykey

      # Reading a value
      %BINARY_NAME% data.bin get mykey

      # Deleting a key
      %BINARY_NAME% data.bin delete mykey

      # Listing every live key
      %BINARY_NAME% data.bin scan

      # Compacting every shard
      %BINARY_NAME% data.bin compact

      # Displaying storage info
      %BINARY_NAME% data.bin info
"#};
