/*!
# The Vee Language

Vee is a tiny imperative language over 32-bit signed integers. A program
is a list of statements. Statements end with `;` unless they carry a block.

```text
var x = 0;
while (x < 5) {
    print(x);
    x = x + 1;
}
```

## Statements

| Form | Meaning |
|------|---------|
| `var x = e;` or `x = e;` | Assign. The first assignment creates the variable. |
| `print(e);` | Write the value and a newline. |
| `if (e) { .. } else { .. }` | The `else` block is optional. |
| `while (e) { .. }` | Loop while `e` is 1. |
| `for (x = 0; x < n; x = x + 1) { .. }` | Init, condition, step, body. |
| `func f(a, b) { .. }` | Declare a function. |
| `return e;` or `return;` | Leave the current function. |
| `e;` | Evaluate and discard. |

Variables assigned outside any function are globals. Inside a function,
parameters and assignments are local to that call. A function that falls
off its end, or uses a bare `return`, returns -1.

## Expressions

From lowest to highest precedence:

```text
||
&&
== !=
< <= > >=
+ -
* / %
! - (unary)
f(a, b)  x  42  ( e )
```

Binary operators associate to the left. Comparisons produce 0 or 1.
`&&` and `||` treat only 1 as true and evaluate both sides. `!` swaps 0
and 1 and leaves other values alone. Overflow and division by zero stop
the program with an error.

Comments are `# to end of line` and `/* block */`.

## Toolchain

```text
vee tokenize prog.vee      # prog.vlex
vee parse prog.vlex        # prog.vbyt, assembly text
vee assemble prog.vbyt     # prog.vcomp, integer words
vee run prog.vcomp
vee exec 16,2,21,23
vee build-run prog.vee
```

*/
